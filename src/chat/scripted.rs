//! In-memory provider that replays scripted replies.
//!
//! Each call to [`ChatProvider::chat_stream_with_tools`] consumes the next
//! [`Script`]; once the queue is empty a short apology is streamed.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::chat::{ChatMessage, ChatProvider, ChunkStream, StreamChunk, Tool};
use crate::error::ConciergeError;
use crate::{FunctionCall, ToolCall};

const EXHAUSTED_REPLY: &str = "I'm sorry, I have nothing more to add.";

/// One scripted provider reply.
#[derive(Debug, Clone)]
pub enum Script {
    /// Stream these text deltas, then stop
    Text(Vec<String>),
    /// Elect a tool with raw JSON arguments
    Tool { name: String, arguments: String },
    /// Fail before any chunk is produced
    Fail(String),
    /// Stream some deltas, then fail
    FailMidStream { deltas: Vec<String>, error: String },
    /// Replay these chunks as-is, with no trailing `Done`
    Chunks(Vec<StreamChunk>),
}

impl Script {
    pub fn text(deltas: &[&str]) -> Self {
        Self::Text(deltas.iter().map(|d| d.to_string()).collect())
    }

    pub fn tool(name: &str, arguments: serde_json::Value) -> Self {
        Self::Tool {
            name: name.to_string(),
            arguments: arguments.to_string(),
        }
    }
}

/// A completed tool call chunk for the given tool, at `index`.
pub fn tool_call_chunk(index: usize, name: &str, arguments: serde_json::Value) -> StreamChunk {
    StreamChunk::ToolUseComplete {
        index,
        tool_call: ToolCall {
            id: format!("call_{}", uuid::Uuid::new_v4().simple()),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
        },
    }
}

/// A recorded provider request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<ChatMessage>,
    pub tool_names: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ScriptedProvider {
    scripts: Mutex<VecDeque<Script>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedProvider {
    pub fn new(scripts: impl IntoIterator<Item = Script>) -> Self {
        Self {
            scripts: Mutex::new(scripts.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn next_script(&self) -> Script {
        self.scripts
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_else(|| Script::text(&[EXHAUSTED_REPLY]))
    }

    fn record(&self, messages: &[ChatMessage], tools: Option<&[Tool]>) {
        let tool_names = tools
            .unwrap_or_default()
            .iter()
            .map(|tool| tool.function.name.clone())
            .collect();
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                messages: messages.to_vec(),
                tool_names,
            });
        }
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn chat_stream_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
    ) -> Result<ChunkStream, ConciergeError> {
        self.record(messages, tools);
        let chunks = match self.next_script() {
            Script::Fail(error) => return Err(ConciergeError::ProviderError(error)),
            Script::Text(deltas) => text_chunks(deltas),
            Script::Tool { name, arguments } => tool_chunks(name, arguments),
            Script::FailMidStream { deltas, error } => {
                let mut chunks: Vec<_> =
                    deltas.into_iter().map(|d| Ok(StreamChunk::Text(d))).collect();
                chunks.push(Err(ConciergeError::ProviderError(error)));
                chunks
            }
            Script::Chunks(chunks) => chunks.into_iter().map(Ok).collect(),
        };
        Ok(Box::pin(futures::stream::iter(chunks)))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn text_chunks(deltas: Vec<String>) -> Vec<Result<StreamChunk, ConciergeError>> {
    let mut chunks: Vec<_> = deltas.into_iter().map(|d| Ok(StreamChunk::Text(d))).collect();
    chunks.push(Ok(StreamChunk::Done {
        stop_reason: "stop".to_string(),
    }));
    chunks
}

fn tool_chunks(name: String, arguments: String) -> Vec<Result<StreamChunk, ConciergeError>> {
    let id = format!("call_{}", uuid::Uuid::new_v4().simple());
    vec![
        Ok(StreamChunk::ToolUseStart {
            index: 0,
            id: id.clone(),
            name: name.clone(),
        }),
        Ok(StreamChunk::ToolUseInputDelta {
            index: 0,
            partial_json: arguments.clone(),
        }),
        Ok(StreamChunk::ToolUseComplete {
            index: 0,
            tool_call: ToolCall {
                id,
                call_type: "function".to_string(),
                function: FunctionCall { name, arguments },
            },
        }),
        Ok(StreamChunk::Done {
            stop_reason: "tool_calls".to_string(),
        }),
    ]
}
