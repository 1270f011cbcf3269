use crate::error::ConciergeError;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ToolError {
    /// Arguments failed schema validation
    #[error("invalid tool arguments for {tool}: {reason}")]
    InvalidArgs { tool: String, reason: String },

    /// Tool not found in registry
    #[error("tool not found: {0}")]
    NotFound(String),
}

impl ToolError {
    pub(crate) fn invalid(tool: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgs {
            tool: tool.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<ToolError> for ConciergeError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::InvalidArgs { tool, reason } => {
                ConciergeError::InvalidToolArgs { tool, reason }
            }
            ToolError::NotFound(name) => ConciergeError::UnknownTool(name),
        }
    }
}
