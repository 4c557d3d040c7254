// src/config.rs
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub prompt: String,
    /// Resolved against HOME.
    pub history_file: PathBuf,
    /// Entries kept for in-editor recall.
    pub history_capacity: usize,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prompt: "$ ".to_string(),
            history_file: PathBuf::from(".jssh_history"),
            history_capacity: 1000,
            color: true,
        }
    }
}

impl Config {
    /// `$JSSH_CONFIG`, else `<config dir>/jssh/config.toml`.
    pub fn path() -> Option<PathBuf> {
        match std::env::var_os("JSSH_CONFIG") {
            Some(p) if !p.is_empty() => Some(PathBuf::from(p)),
            _ => dirs::config_dir().map(|d| d.join("jssh").join("config.toml")),
        }
    }

    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// A missing file is not an error; it just means defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        tracing::info!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.prompt, "$ ");
        assert_eq!(config.history_file, PathBuf::from(".jssh_history"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "prompt = \"jssh> \"\ncolor = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.prompt, "jssh> ");
        assert!(!config.color);
        assert_eq!(config.history_capacity, 1000);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "promt = \"typo\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }
}
