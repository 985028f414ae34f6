use serde::Serialize;

use super::registry::{ToolDescriptor, ToolRegistry};
use super::schema::ParameterSchema;

/// Public listing entry for one tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSummary<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub json_schema: &'a ParameterSchema,
    pub is_dangerous: bool,
    pub function_type: &'a str,
    pub is_long_running_tool: bool,
    pub pre_call_prompt: Option<&'a str>,
    pub post_call_prompt: Option<&'a str>,
    pub rerun: bool,
    pub rerun_with_different_parameters: bool,
}

impl<'a> From<&'a ToolDescriptor> for ToolSummary<'a> {
    fn from(tool: &'a ToolDescriptor) -> Self {
        Self {
            name: &tool.name,
            description: &tool.description,
            json_schema: &tool.parameter_schema,
            is_dangerous: tool.is_dangerous,
            function_type: &tool.function_type,
            is_long_running_tool: tool.is_long_running_tool,
            pre_call_prompt: tool.pre_call_prompt.as_deref(),
            post_call_prompt: tool.post_call_prompt.as_deref(),
            rerun: tool.rerun,
            rerun_with_different_parameters: tool.rerun_with_different_parameters,
        }
    }
}

/// Every registered tool, in registration order.
pub fn list_tools(registry: &ToolRegistry) -> Vec<ToolSummary<'_>> {
    registry.tools().iter().map(ToolSummary::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::error::ToolError;
    use crate::tools::registry::ToolHandler;
    use async_trait::async_trait;
    use serde_json::{Map, Value, json};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Noop;

    #[async_trait]
    impl ToolHandler for Noop {
        async fn call(&self, _props: Map<String, Value>) -> Result<Value, ToolError> {
            Ok(Value::Null)
        }
    }

    fn descriptor(name: &str) -> ToolDescriptor {
        let schema = ParameterSchema::Object {
            properties: Default::default(),
            required: Vec::new(),
        };
        ToolDescriptor::new(name, format!("{name} tool"), schema, Arc::new(Noop))
    }

    #[test]
    fn test_projection_uses_wire_names() {
        let registry = ToolRegistry::new(vec![
            descriptor("wipe")
                .with_dangerous(true)
                .with_function_type("async")
                .with_long_running(true)
                .with_pre_call_prompt("Are you sure?")
                .with_rerun(false, false),
        ])
        .unwrap();

        let value = serde_json::to_value(list_tools(&registry)).unwrap();
        assert_eq!(
            value,
            json!([{
                "name": "wipe",
                "description": "wipe tool",
                "jsonSchema": { "type": "object", "default": {}, "properties": {}, "required": [] },
                "isDangerous": true,
                "functionType": "async",
                "isLongRunningTool": true,
                "preCallPrompt": "Are you sure?",
                "postCallPrompt": null,
                "rerun": false,
                "rerunWithDifferentParameters": false
            }])
        );
    }

    #[test]
    fn test_all_tools_listed_in_order() {
        let registry = ToolRegistry::new(vec![
            descriptor("c"),
            descriptor("a").with_dangerous(true),
            descriptor("b"),
        ])
        .unwrap();
        let names: Vec<_> = list_tools(&registry).iter().map(|t| t.name).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn test_empty_registry_lists_nothing() {
        let registry = ToolRegistry::default();
        assert!(list_tools(&registry).is_empty());
        assert_eq!(serde_json::to_value(list_tools(&registry)).unwrap(), json!([]));
    }
}
