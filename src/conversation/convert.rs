use crate::chat::ChatMessage;
use crate::{FunctionCall, ToolCall};

use super::message::{Content, ContentPart, Message, Role};

/// Converts the committed log into provider messages.
pub fn to_chat_messages(messages: &[Message]) -> Vec<ChatMessage> {
    messages.iter().map(to_chat_message).collect()
}

fn to_chat_message(message: &Message) -> ChatMessage {
    match (&message.role, &message.content) {
        (Role::User, Content::Text(text)) => ChatMessage::user().content(text).build(),
        (_, Content::Text(text)) => ChatMessage::assistant().content(text).build(),
        (_, Content::Parts(parts)) => parts_to_chat_message(parts),
    }
}

fn parts_to_chat_message(parts: &[ContentPart]) -> ChatMessage {
    let mut calls = Vec::new();
    let mut results = Vec::new();
    for part in parts {
        match part {
            ContentPart::ToolCall {
                tool_call_id,
                tool_name,
                args,
            } => calls.push(function_call(tool_call_id, tool_name, args.to_string())),
            ContentPart::ToolResult {
                tool_call_id,
                tool_name,
                result,
            } => results.push(function_call(tool_call_id, tool_name, result.to_string())),
        }
    }
    if results.is_empty() {
        ChatMessage::assistant().tool_use(calls).build()
    } else {
        ChatMessage::assistant().tool_result(results).build()
    }
}

fn function_call(id: &str, name: &str, arguments: String) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        call_type: "function".to_string(),
        function: FunctionCall {
            name: name.to_string(),
            arguments,
        },
    }
}
