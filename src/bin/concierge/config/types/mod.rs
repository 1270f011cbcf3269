mod app;
mod logging;
mod persona;
mod provider;
mod storage;

const DEFAULT_LOG_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 5;

pub use app::AppConfig;
pub use logging::LoggingConfig;
pub use persona::PersonaConfig;
pub use provider::ProviderConfig;
pub use storage::StorageConfig;
