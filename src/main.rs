// src/main.rs
mod completion;
mod config;
mod error;
mod executor;
mod history;
mod parser;
mod readline;
mod shell;
#[cfg(test)]
mod testing;

use anyhow::Context;
use config::Config;
use error::ShellError;
use executor::launch::ProcessLauncher;
use history::HistoryLog;
use readline::{Editor, LineSource, ReaderSource};
use shell::Shell;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("jssh: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// `JSSH_LOG` picks the filter, e.g. `JSSH_LOG=debug`. Silent otherwise.
fn init_logging() {
    let filter = EnvFilter::try_from_env("JSSH_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run() -> anyhow::Result<()> {
    let home = home_dir().context("cannot locate the history file")?;

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("jssh: warning: {e}; using defaults");
        tracing::warn!(error = %e, "config fallback");
        Config::default()
    });

    let history = HistoryLog::in_home(&home, &config.history_file);
    let color = config.color && io::stderr().is_terminal();

    let mut source: Box<dyn LineSource> = if io::stdin().is_terminal() {
        let recall = recall_entries(&history);
        Box::new(Editor::new(&config.prompt, config.history_capacity, &recall))
    } else {
        Box::new(ReaderSource::new(io::stdin().lock()))
    };

    let mut shell = Shell::new(history, Box::new(ProcessLauncher)).with_color(color);
    let mut stdout = io::stdout();
    shell.run(source.as_mut(), &mut stdout)?;

    stdout.flush().ok();
    tracing::info!("shutting down");
    Ok(())
}

/// Lines for arrow-key recall. A missing log is the first session; anything else is worth a warning.
fn recall_entries(history: &HistoryLog) -> Vec<String> {
    history.entries().unwrap_or_else(|e| {
        if e.kind() != io::ErrorKind::NotFound {
            tracing::warn!(error = %e, path = %history.path().display(), "could not seed recall history");
        }
        Vec::new()
    })
}

fn home_dir() -> Result<PathBuf, ShellError> {
    match std::env::var_os("HOME") {
        Some(h) if !h.is_empty() => Ok(PathBuf::from(h)),
        _ => Err(ShellError::HomeUnset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recall_starts_empty_without_a_log() {
        let dir = tempfile::tempdir().unwrap();
        assert!(recall_entries(&HistoryLog::new(dir.path().join("missing"))).is_empty());
    }

    #[test]
    fn unreadable_log_gives_empty_recall() {
        let dir = tempfile::tempdir().unwrap();
        assert!(recall_entries(&HistoryLog::new(dir.path())).is_empty());
    }

    #[test]
    fn recall_reads_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let log = HistoryLog::new(dir.path().join(".jssh_history"));
        log.append("ls").unwrap();
        assert_eq!(recall_entries(&log), ["ls"]);
    }
}
