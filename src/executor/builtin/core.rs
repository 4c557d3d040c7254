// src/executor/builtin/core.rs
use super::Builtin;
use crate::error::CommandError;
use crate::history::{read_entries, HistoryLog};
use crate::parser::ArgVector;
use std::io::Write;
use std::path::{Path, PathBuf};

/// `cd [dir]`. Arguments past the first are ignored.
pub fn builtin_cd(argv: &ArgVector, home: Option<&Path>) -> Result<(), CommandError> {
    let target: PathBuf = match argv.args().first() {
        Some(path) => PathBuf::from(path),
        None => match home {
            Some(h) if !h.as_os_str().is_empty() => h.to_path_buf(),
            _ => return Err(CommandError::HomeUnset),
        },
    };

    std::env::set_current_dir(&target)
        .map_err(|source| CommandError::ChangeDir { path: target.clone(), source })?;
    tracing::debug!(dir = %target.display(), "changed directory");
    Ok(())
}

pub fn builtin_history(history: &HistoryLog, out: &mut dyn Write) -> Result<(), CommandError> {
    let path = history.path().to_path_buf();
    let file = history
        .open()
        .map_err(|source| CommandError::HistoryOpen { path: path.clone(), source })?;
    let entries = read_entries(file).map_err(|source| CommandError::HistoryRead { path, source })?;
    for line in entries {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

pub fn builtin_help(out: &mut dyn Write) -> Result<(), CommandError> {
    writeln!(out, "jssh - Jack Sovern SHell")?;
    writeln!(out, "builtin commands:")?;
    for builtin in Builtin::ALL {
        writeln!(out, "  {:<12} {}", builtin.usage(), builtin.summary())?;
    }
    writeln!(out, "run `man <command>` for help with any other program")?;
    Ok(())
}
