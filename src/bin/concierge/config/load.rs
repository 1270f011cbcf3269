use std::fs;
use std::path::{Path, PathBuf};

use super::error::ConfigError;
use super::paths::ConfigPaths;
use super::types::AppConfig;

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub paths: ConfigPaths,
    pub config_exists: bool,
}

pub fn load_config(path_override: Option<PathBuf>) -> Result<LoadedConfig, ConfigError> {
    let paths = ConfigPaths::resolve(path_override)?;
    load_from(paths)
}

pub(super) fn load_from(paths: ConfigPaths) -> Result<LoadedConfig, ConfigError> {
    ensure_dirs(&paths)?;
    let read = read_config(&paths.config_file)?;
    secure_file_permissions(&paths.config_file)?;
    Ok(LoadedConfig {
        config: read.config,
        paths,
        config_exists: read.exists,
    })
}

fn read_config(path: &Path) -> Result<ConfigRead, ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(ConfigRead {
            config: toml::from_str(&contents)?,
            exists: true,
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(ConfigRead {
            config: AppConfig::default(),
            exists: false,
        }),
        Err(err) => Err(ConfigError::Io(err)),
    }
}

struct ConfigRead {
    config: AppConfig,
    exists: bool,
}

pub(super) fn ensure_dirs(paths: &ConfigPaths) -> Result<(), ConfigError> {
    fs::create_dir_all(&paths.config_dir)?;
    fs::create_dir_all(&paths.data_dir)?;
    fs::create_dir_all(&paths.logs_dir)?;
    Ok(())
}

// The file may hold an API key.
pub(super) fn secure_file_permissions(path: &Path) -> Result<(), ConfigError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = fs::metadata(path) {
            let mut perms = metadata.permissions();
            let mode = perms.mode() & 0o777;
            if mode & 0o077 != 0 {
                perms.set_mode(0o600);
                fs::set_permissions(path, perms)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::save_config;

    fn temp_paths(root: &Path) -> ConfigPaths {
        ConfigPaths::from_dirs(
            root.join("config"),
            root.join("data"),
            root.join("config").join("config.toml"),
        )
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = load_from(temp_paths(dir.path())).expect("load");
        assert!(!loaded.config_exists);
        assert!(loaded.config.storage.enabled);
        assert_eq!(loaded.config.logging.level, "info");
        assert!(loaded.paths.logs_dir.exists());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = temp_paths(dir.path());
        fs::create_dir_all(&paths.config_dir).expect("mkdir");
        fs::write(
            &paths.config_file,
            "[provider]\nmodel = \"gpt-4o\"\ntimeout_seconds = 30\n",
        )
        .expect("write");

        let loaded = load_from(paths).expect("load");
        assert!(loaded.config_exists);
        assert_eq!(loaded.config.provider.model.as_deref(), Some("gpt-4o"));
        assert_eq!(loaded.config.provider.timeout_seconds, Some(30));
        assert!(loaded.config.persona.customer_profile);
    }

    #[test]
    fn saved_config_reloads() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = temp_paths(dir.path());
        let mut config = AppConfig::default();
        config.persona.system_prompt = Some("Be brief.".to_string());
        config.storage.enabled = false;
        save_config(&config, &paths).expect("save");

        let loaded = load_from(paths).expect("load");
        assert_eq!(loaded.config.persona.system_prompt.as_deref(), Some("Be brief."));
        assert!(!loaded.config.storage.enabled);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = temp_paths(dir.path());
        fs::create_dir_all(&paths.config_dir).expect("mkdir");
        fs::write(&paths.config_file, "[provider\n").expect("write");
        let err = load_from(paths).expect_err("malformed config");
        assert!(err.to_string().starts_with("invalid concierge config"));
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
