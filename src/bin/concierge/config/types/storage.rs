use serde::{Deserialize, Serialize};

const DEFAULT_STORAGE_ENABLED: bool = true;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub enabled: bool,
    pub conversations_dir: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_STORAGE_ENABLED,
            conversations_dir: None,
        }
    }
}
