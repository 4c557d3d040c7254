// src/completion/mod.rs
// Tab completion: builtin and PATH command names for the first word, file paths everywhere.

use crate::executor::builtin::Builtin;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub value: String,
    pub builtin: bool,
    /// Finished words get a trailing space; directories stay open for more typing.
    pub append_space: bool,
}

impl Completion {
    fn word(value: String, builtin: bool) -> Self {
        Completion { value, builtin, append_space: true }
    }
}

pub fn complete(partial: &str, is_first_word: bool) -> Vec<Completion> {
    if is_first_word && !partial.contains('/') {
        if partial.is_empty() {
            return Vec::new();
        }
        let mut results: Vec<Completion> = Builtin::ALL
            .iter()
            .map(|b| b.name())
            .filter(|name| name.starts_with(partial))
            .map(|name| Completion::word(name.to_string(), true))
            .collect();

        let path_var = std::env::var_os("PATH").unwrap_or_default();
        for name in complete_commands(partial, &path_var) {
            if !results.iter().any(|c| c.value == name) {
                results.push(Completion::word(name, false));
            }
        }
        return results;
    }

    complete_path(partial)
}

/// Entries of `partial`'s directory whose names start with its last component.
pub fn complete_path(partial: &str) -> Vec<Completion> {
    let (dir, prefix) = match partial.rfind('/') {
        Some(i) => (&partial[..=i], &partial[i + 1..]),
        None => ("", partial),
    };
    let search: PathBuf = if dir.is_empty() { PathBuf::from(".") } else { PathBuf::from(dir) };

    let Ok(entries) = std::fs::read_dir(&search) else { return Vec::new() };

    let mut matches: Vec<Completion> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            // Hidden files only when asked for.
            if !name.starts_with(prefix) || (name.starts_with('.') && !prefix.starts_with('.')) {
                return None;
            }
            let is_dir = entry.path().is_dir();
            Some(Completion {
                value: if is_dir { format!("{dir}{name}/") } else { format!("{dir}{name}") },
                builtin: false,
                append_space: !is_dir,
            })
        })
        .collect();

    matches.sort_by(|a, b| a.value.cmp(&b.value));
    matches
}

/// Executable names on `path_var` starting with `partial`, sorted and deduplicated.
pub fn complete_commands(partial: &str, path_var: &std::ffi::OsStr) -> Vec<String> {
    let mut commands = Vec::new();

    for dir in std::env::split_paths(path_var) {
        let Ok(entries) = std::fs::read_dir(&dir) else { continue };
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with(partial) && is_executable(&entry.path()) {
                commands.push(name);
            }
        }
    }

    commands.sort();
    commands.dedup();
    commands
}

fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path)
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }
    #[cfg(not(unix))]
    {
        path.is_file()
    }
}
