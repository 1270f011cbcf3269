use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::ConciergeError;

use super::id::ChatId;
use super::state::ConversationState;

/// Notified on every state replacement; `done` marks a finalized turn.
pub trait StateObserver: Send + Sync {
    fn on_set_state(&self, state: &ConversationState, done: bool);
}

/// Observer that ignores every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StateObserver for NoopObserver {
    fn on_set_state(&self, _state: &ConversationState, _done: bool) {}
}

/// Owns the conversation state of one chat session.
pub struct Session {
    state: ConversationState,
    observer: Arc<dyn StateObserver>,
}

impl Session {
    pub fn new(observer: Arc<dyn StateObserver>) -> Self {
        Self::with_state(ConversationState::new(), observer)
    }

    pub fn with_state(state: ConversationState, observer: Arc<dyn StateObserver>) -> Self {
        Self { state, observer }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn chat_id(&self) -> ChatId {
        self.state.chat_id
    }

    /// Replaces the state mid-turn.
    pub fn update(&mut self, next: ConversationState) -> Result<(), ConciergeError> {
        self.replace(next, false)
    }

    /// Replaces the state and marks the turn as finalized.
    pub fn done(&mut self, next: ConversationState) -> Result<(), ConciergeError> {
        self.replace(next, true)
    }

    fn replace(&mut self, next: ConversationState, done: bool) -> Result<(), ConciergeError> {
        if !next.extends(&self.state) {
            return Err(ConciergeError::InvalidStateTransition {
                chat_id: self.state.chat_id.to_string(),
            });
        }
        log::debug!(
            "chat {} state: {} -> {} messages (done: {done})",
            self.state.chat_id,
            self.state.len(),
            next.len()
        );
        self.state = next;
        self.observer.on_set_state(&self.state, done);
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Arc::new(NoopObserver))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Cloneable handle shared between a turn and its streaming task.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<Mutex<Session>>,
}

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub async fn snapshot(&self) -> ConversationState {
        self.inner.lock().await.state().clone()
    }

    pub async fn chat_id(&self) -> ChatId {
        self.inner.lock().await.chat_id()
    }

    /// Appends via replacement, computing the new state under the lock.
    pub async fn append(
        &self,
        messages: Vec<super::Message>,
        done: bool,
    ) -> Result<ConversationState, ConciergeError> {
        let mut session = self.inner.lock().await;
        let next = session.state().appended(messages);
        if done {
            session.done(next.clone())?;
        } else {
            session.update(next.clone())?;
        }
        Ok(next)
    }
}
