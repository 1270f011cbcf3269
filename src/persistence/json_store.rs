use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::conversation::{ChatId, ConversationState, StateObserver};

use super::error::PersistenceError;

/// On-disk form of a finalized conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredConversation {
    pub saved_at: DateTime<Utc>,
    pub state: ConversationState,
}

/// Writes one `{chatId}.json` file per conversation whenever a turn is
/// finalized.
#[derive(Debug, Clone)]
pub struct JsonConversationStore {
    dir: PathBuf,
}

impl JsonConversationStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save(&self, state: &ConversationState) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir)?;
        let record = StoredConversation {
            saved_at: Utc::now(),
            state: state.clone(),
        };
        let payload = serde_json::to_vec_pretty(&record)?;
        fs::write(self.path_for(state.chat_id), payload)?;
        Ok(())
    }

    pub fn load(&self, id: ChatId) -> Result<Option<StoredConversation>, PersistenceError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        self.load_path(&path).map(Some)
    }

    /// Loads every readable conversation, newest first. Unreadable files
    /// are skipped.
    pub fn load_all(&self) -> Result<Vec<StoredConversation>, PersistenceError> {
        let mut items = Vec::new();
        if !self.dir.exists() {
            return Ok(items);
        }
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match self.load_path(&path) {
                Ok(conv) => items.push(conv),
                Err(err) => log::warn!("skipping {}: {err}", path.display()),
            }
        }
        items.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(items)
    }

    fn load_path(&self, path: &Path) -> Result<StoredConversation, PersistenceError> {
        let data = fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    fn path_for(&self, id: ChatId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

impl StateObserver for JsonConversationStore {
    fn on_set_state(&self, state: &ConversationState, done: bool) {
        if !done {
            return;
        }
        match self.save(state) {
            Ok(()) => log::debug!("saved chat {} ({} messages)", state.chat_id, state.len()),
            Err(err) => log::warn!("failed to save chat {}: {err}", state.chat_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::conversation::Message;

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonConversationStore::new(dir.path().join("conversations"));
        let state = ConversationState::new().appended([
            Message::user("show me everything"),
            Message::tool_call("c1", "showInventory", json!({})),
            Message::tool_result("c1", "showInventory", json!([])),
        ]);
        store.save(&state).expect("save");

        let loaded = store.load(state.chat_id).expect("load").expect("present");
        assert_eq!(loaded.state, state);
        assert_eq!(store.load_all().expect("load all").len(), 1);
    }

    #[test]
    fn only_finalized_updates_are_written() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonConversationStore::new(dir.path().to_path_buf());
        let state = ConversationState::new().appended([Message::user("hi")]);

        store.on_set_state(&state, false);
        assert!(store.load(state.chat_id).expect("load").is_none());

        store.on_set_state(&state, true);
        assert!(store.load(state.chat_id).expect("load").is_some());
    }

    #[test]
    fn unreadable_files_are_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("broken.json"), b"{").expect("write");
        fs::write(dir.path().join("notes.txt"), b"ignored").expect("write");
        let store = JsonConversationStore::new(dir.path().to_path_buf());
        assert!(store.load_all().expect("load all").is_empty());
    }

    #[test]
    fn missing_directory_loads_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonConversationStore::new(dir.path().join("absent"));
        assert!(store.load_all().expect("load all").is_empty());
    }

    #[test]
    fn corrupt_conversation_reports_a_json_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonConversationStore::new(dir.path().to_path_buf());
        let id = ConversationState::new().chat_id;
        fs::write(store.path_for(id), b"{").expect("write");

        let err = store.load(id).expect_err("corrupt file");
        assert!(matches!(err, PersistenceError::Serde(_)));
        assert!(err.to_string().starts_with("stored conversation is not valid JSON"));
    }
}
