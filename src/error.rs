// src/error.rs
use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop the interpreter as a whole.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("HOME is not set")]
    HomeUnset,

    #[error("out of memory while splitting input")]
    OutOfMemory(#[from] TryReserveError),

    #[error("failed to read input")]
    Input(#[source] io::Error),
}

/// Errors confined to a single command. The loop reports them and carries on.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("cd: HOME not set")]
    HomeUnset,

    #[error("cd: {}: {source}", path.display())]
    ChangeDir { path: PathBuf, source: io::Error },

    #[error("history: cannot open {}: {source}", path.display())]
    HistoryOpen { path: PathBuf, source: io::Error },

    #[error("history: cannot read {}: {source}", path.display())]
    HistoryRead { path: PathBuf, source: io::Error },

    #[error("{command}: command not found")]
    NotFound { command: String },

    #[error("{command}: permission denied")]
    PermissionDenied { command: String },

    #[error("{command}: {source}")]
    Spawn { command: String, source: io::Error },

    #[error("{command}: wait failed: {source}")]
    Wait { command: String, source: io::Error },

    #[error("write failed: {0}")]
    Output(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config {}: {source}", path.display())]
    Parse { path: PathBuf, source: toml::de::Error },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_errors_name_their_cause_once() {
        let cause = io::Error::new(io::ErrorKind::InvalidData, "bad byte");
        let err = anyhow::Error::from(ShellError::Input(cause));

        let shown = format!("{err:#}");
        assert_eq!(shown, "failed to read input: bad byte");
    }
}
