use thiserror::Error;

/// Errors produced while running a concierge turn.
#[derive(Debug, Error)]
pub enum ConciergeError {
    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Authentication and authorization errors
    #[error("Auth error: {0}")]
    AuthError(String),
    /// Invalid request parameters or format
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Errors returned by the model provider
    #[error("Provider error: {0}")]
    ProviderError(String),
    /// API response parsing or format error
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// User input was empty
    #[error("message must not be empty")]
    EmptyInput,
    /// The model asked for a tool that is not registered
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    /// Tool arguments failed schema validation
    #[error("invalid arguments for {tool}: {reason}")]
    InvalidToolArgs { tool: String, reason: String },
    /// A state update did not extend the current message log
    #[error("state update for chat {chat_id} does not extend the current history")]
    InvalidStateTransition { chat_id: String },
    /// The text stream ended without a committed result
    #[error("stream closed: {0}")]
    StreamClosed(String),
    /// JSON serialization/deserialization errors
    #[error("JSON parse error: {0}")]
    JsonError(String),
    /// Generic error
    #[error("Generic error: {0}")]
    Generic(String),
}

/// Converts reqwest HTTP errors into ConciergeErrors
impl From<reqwest::Error> for ConciergeError {
    fn from(err: reqwest::Error) -> Self {
        ConciergeError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for ConciergeError {
    fn from(err: serde_json::Error) -> Self {
        ConciergeError::JsonError(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}
