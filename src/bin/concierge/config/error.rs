use std::io;

/// Failures reading or writing `config.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not access concierge config: {0}")]
    Io(#[from] io::Error),
    #[error("invalid concierge config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("could not encode concierge config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("no home directory to place the concierge config in")]
    MissingHome,
}
