mod error;
mod json_store;

pub use error::PersistenceError;
pub use json_store::{JsonConversationStore, StoredConversation};
