use serde::{Deserialize, Serialize};

use super::{LoggingConfig, PersonaConfig, ProviderConfig, StorageConfig};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub persona: PersonaConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}
