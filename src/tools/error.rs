/// Failure reported by a tool handler.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The supplied props could not be decoded into the tool's parameters.
    #[error("{0}")]
    Validation(String),

    /// The tool ran and failed.
    #[error(transparent)]
    Execution(#[from] anyhow::Error),
}

/// Failure of a single invocation, as seen by the transport boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvocationError {
    #[error("Tool not found")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Internal(String),
}

impl InvocationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "ToolNotFound",
            Self::Validation(_) => "ValidationFailure",
            Self::Internal(_) => "InternalError",
        }
    }
}

impl From<ToolError> for InvocationError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::Validation(message) => Self::Validation(message),
            // Alternate formatting keeps the whole context chain in the message.
            ToolError::Execution(err) => Self::Internal(format!("{err:#}")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate tool name: {0}")]
    DuplicateTool(String),
}
