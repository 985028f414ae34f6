use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::error::InvocationError;
use super::registry::ToolRegistry;

/// Outcome of one invocation: the tool's value, or a classified failure.
pub type InvocationResult = Result<Value, InvocationError>;

/// Dispatches invocations against a shared, read-only registry.
#[derive(Debug, Clone)]
pub struct ToolInvoker {
    registry: Arc<ToolRegistry>,
}

impl ToolInvoker {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Resolve `tool_name` and run it with `props`.
    ///
    /// Handler errors and panics are both turned into
    /// [`InvocationError::Internal`]; nothing is retried.
    pub async fn invoke(&self, tool_name: &str, props: Map<String, Value>) -> InvocationResult {
        let Some(tool) = self.registry.find_by_name(tool_name) else {
            warn!(name: "tool.not_found", tool = %tool_name, "Tool not found");
            return Err(InvocationError::NotFound(tool_name.to_string()));
        };

        let started = Instant::now();
        let outcome = AssertUnwindSafe(tool.handler().call(props))
            .catch_unwind()
            .await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let result = match outcome {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(InvocationError::from(err)),
            Err(panic) => Err(InvocationError::Internal(panic_message(panic.as_ref()))),
        };

        match &result {
            Ok(_) => info!(name: "tool.invoked", tool = %tool_name, elapsed_ms, "Tool invoked"),
            Err(err) => warn!(
                name: "tool.failed",
                tool = %tool_name,
                kind = err.kind(),
                error = %err,
                elapsed_ms,
                "Tool invocation failed"
            ),
        }
        result
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "tool panicked".to_string()
    }
}
