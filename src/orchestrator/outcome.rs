use serde_json::Value;

use crate::error::ConciergeError;
use crate::view::View;

use super::text_stream::TextStream;

/// A committed tool call and its result.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    pub call_id: String,
    pub name: String,
    pub args: Value,
    pub result: Value,
}

/// What a turn committed to the conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    TextCompletion(String),
    ToolInvocation(ToolInvocation),
}

/// The view returned to the caller for one turn.
#[derive(Debug, Clone)]
pub enum RenderedTurn {
    /// Plain reply, still streaming when returned
    Text(TextStream),
    /// Tool turn, already committed
    Tool {
        invocation: ToolInvocation,
        view: View,
    },
}

impl RenderedTurn {
    pub fn view(&self) -> View {
        self.clone().into_view()
    }

    pub fn into_view(self) -> View {
        match self {
            RenderedTurn::Text(stream) => View::Text(stream),
            RenderedTurn::Tool { view, .. } => view,
        }
    }

    /// Waits for text turns to finish; tool turns resolve immediately.
    pub async fn outcome(&self) -> Result<TurnOutcome, ConciergeError> {
        match self {
            RenderedTurn::Text(stream) => stream.finished().await.map(TurnOutcome::TextCompletion),
            RenderedTurn::Tool { invocation, .. } => {
                Ok(TurnOutcome::ToolInvocation(invocation.clone()))
            }
        }
    }
}
