use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::id::ChatId;
use super::message::{ContentPart, Message};

/// The conversation log of one chat. Values are replaced, never patched:
/// [`ConversationState::appended`] returns a new state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    pub chat_id: ChatId,
    messages: Vec<Message>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// A new state holding these messages after the current ones.
    pub fn appended(&self, messages: impl IntoIterator<Item = Message>) -> Self {
        let mut next = self.clone();
        next.messages.extend(messages);
        next
    }

    /// True when `self` is `previous` plus zero or more appended messages.
    pub fn extends(&self, previous: &ConversationState) -> bool {
        self.chat_id == previous.chat_id
            && self.messages.len() >= previous.messages.len()
            && self.messages[..previous.messages.len()] == previous.messages[..]
    }

    /// Ids of tool calls with no matching result, or with more than one.
    pub fn unpaired_tool_calls(&self) -> Vec<String> {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for part in self.messages.iter().flat_map(Message::parts) {
            let entry = counts.entry(part.tool_call_id()).or_default();
            match part {
                ContentPart::ToolCall { .. } => entry.0 += 1,
                ContentPart::ToolResult { .. } => entry.1 += 1,
            }
        }
        let mut unpaired: Vec<String> = counts
            .into_iter()
            .filter(|(_, (calls, results))| *calls != 1 || *results != 1)
            .map(|(id, _)| id.to_string())
            .collect();
        unpaired.sort();
        unpaired
    }
}
