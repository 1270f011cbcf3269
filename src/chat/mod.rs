mod message;
#[doc(hidden)]
pub mod scripted;
mod sse;
mod stream;
mod tool;
mod traits;

pub use message::{ChatMessage, ChatMessageBuilder, ChatRole, MessageType};
pub use stream::StreamChunk;
pub use tool::{FunctionTool, ParameterProperty, ParametersSchema, Tool};
pub use traits::{ChatProvider, ChunkStream};

pub(crate) use sse::{extract_payload, SseEventBuffer, DONE_EVENT};
