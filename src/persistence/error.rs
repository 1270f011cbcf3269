use std::io;

/// Failures saving or loading a stored conversation.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("conversation store IO error: {0}")]
    Io(#[from] io::Error),
    #[error("stored conversation is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}
