//! Runs one user turn against the provider.
//!
//! A turn is either a streamed text completion or exactly one tool
//! invocation. Tool turns commit the call and its result in a single state
//! replacement; text turns commit the assistant message once the stream
//! ends.

mod outcome;
mod persona;
mod text_stream;

use std::sync::Arc;

use futures::StreamExt;

use crate::chat::{ChatMessage, ChatProvider, ChunkStream, StreamChunk};
use crate::conversation::{generate_tool_call_id, to_chat_messages, Message, SessionHandle};
use crate::error::ConciergeError;
use crate::tools::ToolRegistry;
use crate::ToolCall;

pub use outcome::{RenderedTurn, ToolInvocation, TurnOutcome};
pub use persona::{CustomerInterests, Persona};
pub use text_stream::{StreamStatus, TextStream};

use text_stream::StreamableText;

pub struct Orchestrator {
    provider: Arc<dyn ChatProvider>,
    registry: ToolRegistry,
    persona: Persona,
}

impl Orchestrator {
    pub fn new(provider: Arc<dyn ChatProvider>, registry: ToolRegistry, persona: Persona) -> Self {
        Self {
            provider,
            registry,
            persona,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// Sends one user message. The user message is committed before the
    /// provider is contacted and stays committed if the turn fails.
    pub async fn send_message(
        &self,
        session: &SessionHandle,
        input: &str,
    ) -> Result<RenderedTurn, ConciergeError> {
        if input.trim().is_empty() {
            return Err(ConciergeError::EmptyInput);
        }
        let state = session.append(vec![Message::user(input)], false).await?;

        let mut request = Vec::with_capacity(state.len() + 1);
        request.push(ChatMessage::system().content(self.persona.system_prompt()).build());
        request.extend(to_chat_messages(state.messages()));
        let schemas = self.registry.schemas();

        log::debug!(
            "chat {}: sending {} messages to {}",
            state.chat_id,
            request.len(),
            self.provider.name()
        );
        let mut stream = self
            .provider
            .chat_stream_with_tools(&request, Some(schemas.as_slice()))
            .await?;

        while let Some(chunk) = stream.next().await {
            match chunk? {
                StreamChunk::Text(delta) if delta.is_empty() => {}
                StreamChunk::Text(delta) => return Ok(stream_text(session.clone(), delta, stream)),
                StreamChunk::ToolUseComplete { tool_call, .. } => {
                    return self.invoke_tool(session, tool_call, stream).await;
                }
                StreamChunk::Done { stop_reason } => {
                    log::debug!("stream ended without content ({stop_reason})");
                    session.append(vec![Message::assistant("")], true).await?;
                    return Ok(RenderedTurn::Text(TextStream::completed(String::new())));
                }
                StreamChunk::ToolUseStart { .. } | StreamChunk::ToolUseInputDelta { .. } => {}
            }
        }

        log::error!("chat {}: stream closed before the turn finished", state.chat_id);
        Err(ConciergeError::StreamClosed(
            "provider stream ended before the turn finished".to_string(),
        ))
    }

    async fn invoke_tool(
        &self,
        session: &SessionHandle,
        call: ToolCall,
        rest: ChunkStream,
    ) -> Result<RenderedTurn, ConciergeError> {
        let validated = self
            .registry
            .validate(&call.function.name, &call.function.arguments)?;
        let output = self.registry.run(&validated)?;

        let call_id = generate_tool_call_id();
        session
            .append(
                vec![
                    Message::tool_call(&call_id, validated.name, validated.args.clone()),
                    Message::tool_result(&call_id, validated.name, output.result.clone()),
                ],
                true,
            )
            .await?;
        log::info!("tool {} committed as {call_id}", validated.name);

        drain_ignored(rest).await;
        Ok(RenderedTurn::Tool {
            invocation: ToolInvocation {
                call_id,
                name: validated.name.to_string(),
                args: validated.args,
                result: output.result,
            },
            view: output.view,
        })
    }
}

fn stream_text(session: SessionHandle, first: String, rest: ChunkStream) -> RenderedTurn {
    let (writer, reader) = StreamableText::new();
    writer.append(&first);
    tokio::spawn(drive_text(session, writer, rest));
    RenderedTurn::Text(reader)
}

async fn drive_text(session: SessionHandle, writer: StreamableText, mut rest: ChunkStream) {
    while let Some(chunk) = rest.next().await {
        match chunk {
            Ok(StreamChunk::Text(delta)) => writer.append(&delta),
            Ok(StreamChunk::ToolUseComplete { tool_call, .. }) => {
                log::warn!(
                    "ignoring tool call {} after text reply",
                    tool_call.function.name
                );
            }
            Ok(StreamChunk::Done { .. }) => {
                commit_text(session, writer).await;
                return;
            }
            Ok(_) => {}
            Err(err) => {
                log::error!("text stream failed: {err}");
                writer.fail(err.to_string());
                return;
            }
        }
    }

    log::error!("text stream closed before the reply finished");
    writer.fail("provider stream ended before the reply finished".to_string());
}

async fn commit_text(session: SessionHandle, writer: StreamableText) {
    let text = writer.text();
    match session.append(vec![Message::assistant(text)], true).await {
        Ok(_) => writer.done(),
        Err(err) => writer.fail(err.to_string()),
    }
}

/// Consumes what is left of a tool turn's stream; only one tool runs.
async fn drain_ignored(mut rest: ChunkStream) {
    while let Some(chunk) = rest.next().await {
        match chunk {
            Ok(StreamChunk::ToolUseComplete { tool_call, .. }) => {
                log::warn!("ignoring extra tool call {}", tool_call.function.name);
            }
            Ok(StreamChunk::Done { .. }) => break,
            Ok(_) => {}
            Err(err) => {
                log::warn!("stream error after tool call: {err}");
                break;
            }
        }
    }
}
