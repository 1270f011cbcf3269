use std::sync::Arc;

use crate::conversation::SessionHandle;
use crate::error::ConciergeError;
use crate::orchestrator::Orchestrator;
use crate::view::View;

use super::preset::PresetConversation;
use super::suggestions::{follow_ups_for, initial_suggestions, SuggestedAction};

/// An entry of the visible history.
#[derive(Debug, Clone)]
pub enum RenderedItem {
    /// Echo of what the user sent
    User(String),
    /// What the orchestrator returned for the turn
    Assistant(View),
}

/// Client-only history and suggestion state for one session.
pub struct ConversationView {
    orchestrator: Arc<Orchestrator>,
    session: SessionHandle,
    presets: &'static [PresetConversation],
    history: Vec<RenderedItem>,
    suggestions: Vec<SuggestedAction>,
}

impl ConversationView {
    pub fn new(
        orchestrator: Arc<Orchestrator>,
        session: SessionHandle,
        presets: &'static [PresetConversation],
    ) -> Self {
        Self {
            orchestrator,
            session,
            presets,
            history: Vec::new(),
            suggestions: initial_suggestions(presets),
        }
    }

    pub fn history(&self) -> &[RenderedItem] {
        &self.history
    }

    pub fn suggestions(&self) -> &[SuggestedAction] {
        &self.suggestions
    }

    pub fn presets(&self) -> &'static [PresetConversation] {
        self.presets
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Sends free-typed text. Suggestions are cleared before sending.
    pub async fn submit(&mut self, input: &str) -> Result<View, ConciergeError> {
        if input.trim().is_empty() {
            return Err(ConciergeError::EmptyInput);
        }
        self.suggestions.clear();
        self.send(input).await
    }

    /// Sends the chosen suggestion; preset suggestions start their preset.
    pub async fn select_suggestion(&mut self, index: usize) -> Result<View, ConciergeError> {
        let suggestion = self.suggestions.get(index).cloned().ok_or_else(|| {
            ConciergeError::InvalidRequest(format!("no suggestion at position {}", index + 1))
        })?;
        if let Some(preset) = suggestion.preset {
            return self.execute_preset(preset).await;
        }
        self.suggestions.clear();
        self.send(&suggestion.action).await
    }

    /// Replays a preset's opening message, then offers its follow-ups.
    pub async fn execute_preset(&mut self, index: usize) -> Result<View, ConciergeError> {
        let preset = *self.presets.get(index).ok_or_else(|| {
            ConciergeError::InvalidRequest(format!("no preset at position {}", index + 1))
        })?;
        self.suggestions.clear();
        let view = self.send(preset.opening_message()).await?;
        self.suggestions = follow_ups_for(&preset);
        Ok(view)
    }

    async fn send(&mut self, text: &str) -> Result<View, ConciergeError> {
        self.history.push(RenderedItem::User(text.to_string()));
        let turn = self.orchestrator.send_message(&self.session, text).await?;
        let view = turn.into_view();
        self.history.push(RenderedItem::Assistant(view.clone()));
        Ok(view)
    }
}
