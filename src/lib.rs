//! Streaming product concierge.
//!
//! A user turn goes to a [`chat::ChatProvider`] together with the full
//! conversation history and the concierge tool schemas. The provider either
//! streams text back or elects one tool; tool results are committed to the
//! conversation as a call/result pair and rendered as a [`view::View`].

use serde::{Deserialize, Serialize};

pub mod backends;
pub mod builder;
pub mod catalog;
pub mod chat;
pub mod client;
pub mod conversation;
pub mod error;
pub mod orchestrator;
pub mod persistence;
pub mod tools;
pub mod view;

pub use error::ConciergeError;

/// A tool call requested by the model.
#[derive(Debug, Deserialize, Serialize, Clone, Eq, PartialEq)]
pub struct ToolCall {
    /// Provider-assigned identifier of the call
    pub id: String,
    /// Always "function" for the tools exposed here
    #[serde(rename = "type")]
    pub call_type: String,
    /// The function to invoke
    pub function: FunctionCall,
}

/// Name and raw JSON arguments of a function call.
#[derive(Debug, Deserialize, Serialize, Clone, Eq, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}
