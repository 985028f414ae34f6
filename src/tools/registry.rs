use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::{RegistryError, ToolError};
use super::schema::ParameterSchema;

/// Invocation target owned by a [`ToolDescriptor`].
#[async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    async fn call(&self, props: Map<String, Value>) -> Result<Value, ToolError>;
}

/// Parameters of a [`TypedTool`], decoded from the raw props object.
pub trait ToolParams: DeserializeOwned + Send {
    /// Checks that serde cannot express (ranges, cross-field rules).
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// A tool with an explicit parameter struct.
///
/// Wrap it in [`Typed`] (or register it with [`ToolDescriptor::typed`]) to get
/// a [`ToolHandler`] that decodes and validates props before running it.
#[async_trait]
pub trait TypedTool: Send + Sync + std::fmt::Debug {
    type Params: ToolParams;

    async fn run(&self, params: Self::Params) -> anyhow::Result<Value>;
}

#[derive(Debug)]
pub struct Typed<T>(pub T);

#[async_trait]
impl<T: TypedTool> ToolHandler for Typed<T> {
    async fn call(&self, props: Map<String, Value>) -> Result<Value, ToolError> {
        let params: T::Params = serde_json::from_value(Value::Object(props))
            .map_err(|e| ToolError::Validation(e.to_string()))?;
        params.validate().map_err(ToolError::Validation)?;
        Ok(self.0.run(params).await?)
    }
}

/// Immutable description of a registered tool plus its handler.
#[derive(Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameter_schema: ParameterSchema,
    pub is_dangerous: bool,
    pub function_type: String,
    pub is_long_running_tool: bool,
    pub pre_call_prompt: Option<String>,
    pub post_call_prompt: Option<String>,
    pub rerun: bool,
    pub rerun_with_different_parameters: bool,
    handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("function_type", &self.function_type)
            .field("is_dangerous", &self.is_dangerous)
            .field("is_long_running_tool", &self.is_long_running_tool)
            .finish()
    }
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameter_schema: ParameterSchema,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameter_schema,
            is_dangerous: false,
            function_type: "sync".to_string(),
            is_long_running_tool: false,
            pre_call_prompt: None,
            post_call_prompt: None,
            rerun: true,
            rerun_with_different_parameters: true,
            handler,
        }
    }

    pub fn typed<T: TypedTool + 'static>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameter_schema: ParameterSchema,
        tool: T,
    ) -> Self {
        Self::new(name, description, parameter_schema, Arc::new(Typed(tool)))
    }

    #[must_use]
    pub fn with_dangerous(mut self, is_dangerous: bool) -> Self {
        self.is_dangerous = is_dangerous;
        self
    }

    #[must_use]
    pub fn with_function_type(mut self, function_type: impl Into<String>) -> Self {
        self.function_type = function_type.into();
        self
    }

    #[must_use]
    pub fn with_long_running(mut self, is_long_running: bool) -> Self {
        self.is_long_running_tool = is_long_running;
        self
    }

    #[must_use]
    pub fn with_pre_call_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.pre_call_prompt = Some(prompt.into());
        self
    }

    #[must_use]
    pub fn with_post_call_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.post_call_prompt = Some(prompt.into());
        self
    }

    #[must_use]
    pub fn with_rerun(mut self, rerun: bool, with_different_parameters: bool) -> Self {
        self.rerun = rerun;
        self.rerun_with_different_parameters = with_different_parameters;
        self
    }

    pub fn handler(&self) -> &Arc<dyn ToolHandler> {
        &self.handler
    }
}

/// Ordered, immutable set of tools keyed by exact name.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    // name -> position in `tools`
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Build the registry, rejecting duplicate names.
    pub fn new(tools: Vec<ToolDescriptor>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(tools.len());
        for (position, tool) in tools.iter().enumerate() {
            if index.insert(tool.name.clone(), position).is_some() {
                return Err(RegistryError::DuplicateTool(tool.name.clone()));
            }
        }
        Ok(Self { tools, index })
    }

    pub fn find_by_name(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&position| &self.tools[position])
    }

    /// Tools in registration order.
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug)]
    struct Echo;

    #[async_trait]
    impl ToolHandler for Echo {
        async fn call(&self, props: Map<String, Value>) -> Result<Value, ToolError> {
            Ok(Value::Object(props))
        }
    }

    #[derive(Debug, Deserialize)]
    struct AddParams {
        a: i64,
        #[serde(default)]
        b: i64,
    }

    impl ToolParams for AddParams {
        fn validate(&self) -> Result<(), String> {
            if self.a < 0 {
                return Err("a must be non-negative".to_string());
            }
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Add;

    #[async_trait]
    impl TypedTool for Add {
        type Params = AddParams;

        async fn run(&self, params: AddParams) -> anyhow::Result<Value> {
            Ok(json!({ "sum": params.a + params.b }))
        }
    }

    fn schema() -> ParameterSchema {
        ParameterSchema::Object {
            properties: Default::default(),
            required: Vec::new(),
        }
    }

    fn echo(name: &str) -> ToolDescriptor {
        ToolDescriptor::new(name, "echo", schema(), Arc::new(Echo))
    }

    fn props(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_find_by_name() {
        let registry = ToolRegistry::new(vec![echo("x"), echo("y")]).unwrap();
        assert_eq!(registry.find_by_name("x").unwrap().name, "x");
        assert_eq!(registry.find_by_name("y").unwrap().name, "y");
        assert!(registry.find_by_name("X").is_none());
        assert!(registry.find_by_name("z").is_none());
    }

    #[test]
    fn test_registration_order_is_kept() {
        let registry = ToolRegistry::new(vec![echo("b"), echo("a"), echo("c")]).unwrap();
        let names: Vec<_> = registry.tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = ToolRegistry::new(vec![echo("x"), echo("x")]).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateTool(name) if name == "x"));
    }

    #[test]
    fn test_descriptor_defaults() {
        let tool = echo("x");
        assert!(!tool.is_dangerous);
        assert!(!tool.is_long_running_tool);
        assert_eq!(tool.function_type, "sync");
        assert!(tool.pre_call_prompt.is_none());
    }

    #[tokio::test]
    async fn test_typed_tool_decodes_params() {
        let handler = Typed(Add);
        let out = handler.call(props(json!({ "a": 2, "b": 3 }))).await.unwrap();
        assert_eq!(out, json!({ "sum": 5 }));
    }

    #[tokio::test]
    async fn test_typed_tool_reports_validation_failures() {
        let handler = Typed(Add);

        let missing = handler.call(props(json!({ "b": 3 }))).await.unwrap_err();
        assert!(matches!(missing, ToolError::Validation(msg) if msg.contains("missing field `a`")));

        let wrong_type = handler.call(props(json!({ "a": "two" }))).await.unwrap_err();
        assert!(matches!(wrong_type, ToolError::Validation(_)));

        let negative = handler.call(props(json!({ "a": -1 }))).await.unwrap_err();
        assert!(matches!(negative, ToolError::Validation(msg) if msg == "a must be non-negative"));
    }
}
