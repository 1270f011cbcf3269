mod convert;
mod id;
mod message;
mod session;
mod state;

pub use convert::to_chat_messages;
pub use id::{generate_tool_call_id, ChatId};
pub use message::{Content, ContentPart, Message, Role};
pub use session::{NoopObserver, Session, SessionHandle, StateObserver};
pub use state::ConversationState;
