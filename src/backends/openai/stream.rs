use std::collections::BTreeMap;

use bytes::Bytes;
use futures::stream::StreamExt;
use serde::Deserialize;

use crate::chat::{extract_payload, ChunkStream, SseEventBuffer, StreamChunk, DONE_EVENT};
use crate::conversation::generate_tool_call_id;
use crate::error::ConciergeError;
use crate::{FunctionCall, ToolCall};

/// Turns a streaming chat completions response into provider chunks.
pub fn create_completions_stream(response: reqwest::Response) -> ChunkStream {
    // A trailing `None` marks the end of the body.
    let stream = response
        .bytes_stream()
        .map(Some)
        .chain(futures::stream::once(futures::future::ready(None)))
        .scan(CompletionsStreamParser::new(), |parser, chunk| {
            let results = match chunk {
                Some(chunk) => parser.handle_chunk(chunk),
                None => parser.handle_end(),
            };
            futures::future::ready(Some(results))
        })
        .flat_map(futures::stream::iter);
    Box::pin(stream)
}

#[derive(Deserialize, Debug)]
struct CompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Deserialize, Debug)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct ChunkDelta {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCallDelta>>,
}

#[derive(Deserialize, Debug)]
struct ToolCallDelta {
    #[serde(default)]
    index: usize,
    id: Option<String>,
    function: Option<FunctionDelta>,
}

#[derive(Deserialize, Debug)]
struct FunctionDelta {
    name: Option<String>,
    arguments: Option<String>,
}

#[derive(Debug)]
struct ToolState {
    id: String,
    name: String,
    arguments: String,
}

struct CompletionsStreamParser {
    sse_buffer: SseEventBuffer,
    results: Vec<Result<StreamChunk, ConciergeError>>,
    tool_states: BTreeMap<usize, ToolState>,
    finished: bool,
    failed: bool,
}

impl CompletionsStreamParser {
    fn new() -> Self {
        Self {
            sse_buffer: SseEventBuffer::new(),
            results: Vec::new(),
            tool_states: BTreeMap::new(),
            finished: false,
            failed: false,
        }
    }

    fn handle_chunk(
        &mut self,
        chunk: Result<Bytes, reqwest::Error>,
    ) -> Vec<Result<StreamChunk, ConciergeError>> {
        match chunk {
            Ok(bytes) => self.handle_bytes(&bytes),
            Err(err) => {
                self.failed = true;
                vec![Err(ConciergeError::HttpError(err.to_string()))]
            }
        }
    }

    /// Called once the body is exhausted. A body that ends before a finish
    /// reason or `[DONE]` is a truncated turn.
    fn handle_end(&mut self) -> Vec<Result<StreamChunk, ConciergeError>> {
        if self.finished || self.failed {
            return Vec::new();
        }
        self.failed = true;
        let pending: Vec<&str> = self
            .tool_states
            .values()
            .map(|state| state.name.as_str())
            .collect();
        vec![Err(ConciergeError::ResponseFormatError {
            message: "stream ended before the completion finished".to_string(),
            raw_response: pending.join(","),
        })]
    }

    fn handle_bytes(&mut self, bytes: &[u8]) -> Vec<Result<StreamChunk, ConciergeError>> {
        self.sse_buffer.push_bytes(bytes);
        for event in self.sse_buffer.drain_events() {
            self.parse_event(&event);
        }
        self.results.drain(..).collect()
    }

    fn parse_event(&mut self, event: &str) {
        let Some(payload) = extract_payload(event) else {
            return;
        };
        if payload == DONE_EVENT {
            self.finish(None);
            return;
        }
        match serde_json::from_str::<CompletionChunk>(&payload) {
            Ok(chunk) => self.handle_completion_chunk(chunk),
            Err(e) => {
                self.failed = true;
                self.results.push(Err(ConciergeError::ResponseFormatError {
                    message: format!("Failed to decode stream chunk: {e}"),
                    raw_response: payload,
                }));
            }
        }
    }

    fn handle_completion_chunk(&mut self, chunk: CompletionChunk) {
        // Only the first choice is ever requested.
        let Some(choice) = chunk.choices.into_iter().next() else {
            return;
        };
        if let Some(content) = choice.delta.content.filter(|c| !c.is_empty()) {
            self.results.push(Ok(StreamChunk::Text(content)));
        }
        for delta in choice.delta.tool_calls.unwrap_or_default() {
            self.handle_tool_delta(delta);
        }
        if let Some(reason) = choice.finish_reason {
            self.finish(Some(reason));
        }
    }

    fn handle_tool_delta(&mut self, delta: ToolCallDelta) {
        let (name, arguments) = match delta.function {
            Some(f) => (f.name, f.arguments),
            None => (None, None),
        };
        let index = delta.index;
        if !self.tool_states.contains_key(&index) {
            let state = ToolState {
                id: delta.id.unwrap_or_else(generate_tool_call_id),
                name: name.unwrap_or_default(),
                arguments: String::new(),
            };
            self.results.push(Ok(StreamChunk::ToolUseStart {
                index,
                id: state.id.clone(),
                name: state.name.clone(),
            }));
            self.tool_states.insert(index, state);
        }
        let Some(partial) = arguments.filter(|a| !a.is_empty()) else {
            return;
        };
        if let Some(state) = self.tool_states.get_mut(&index) {
            state.arguments.push_str(&partial);
            self.results.push(Ok(StreamChunk::ToolUseInputDelta {
                index,
                partial_json: partial,
            }));
        }
    }

    fn finish(&mut self, reason: Option<String>) {
        if self.finished {
            return;
        }
        self.finished = true;
        let saw_tool_call = !self.tool_states.is_empty();
        for (index, state) in std::mem::take(&mut self.tool_states) {
            self.results.push(Ok(StreamChunk::ToolUseComplete {
                index,
                tool_call: ToolCall {
                    id: state.id,
                    call_type: "function".to_string(),
                    function: FunctionCall {
                        name: state.name,
                        arguments: state.arguments,
                    },
                },
            }));
        }
        let default_reason = if saw_tool_call { "tool_calls" } else { "stop" };
        let stop_reason = reason.unwrap_or_else(|| default_reason.to_string());
        self.results.push(Ok(StreamChunk::Done { stop_reason }));
    }
}
