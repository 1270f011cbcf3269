use std::pin::Pin;

use async_trait::async_trait;
use futures::stream::Stream;

use crate::error::ConciergeError;

use super::message::ChatMessage;
use super::stream::StreamChunk;
use super::tool::Tool;

/// Boxed stream of provider chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, ConciergeError>> + Send>>;

/// Trait for providers that stream chat replies and may elect a tool.
#[async_trait]
pub trait ChatProvider: Sync + Send {
    async fn chat_stream_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
    ) -> Result<ChunkStream, ConciergeError>;

    /// Human-readable provider name used in logs.
    fn name(&self) -> &str {
        "provider"
    }
}
