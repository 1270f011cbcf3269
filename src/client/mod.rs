//! Client-side conversation view: rendered history, suggested follow-up
//! actions and scripted preset conversations.

mod preset;
mod suggestions;
mod view;

pub use preset::{FollowUpPrompt, PresetConversation, PRESET_CONVERSATIONS};
pub use suggestions::{
    follow_ups_for, initial_suggestions, SuggestedAction, LABEL_MAX_CHARS, MAX_SUGGESTIONS,
};
pub use view::{ConversationView, RenderedItem};
