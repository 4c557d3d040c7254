// src/history.rs
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// Append-only, newline-delimited log of executed command lines.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HistoryLog { path: path.into() }
    }

    /// Log living at `home/file_name`. An absolute `file_name` is used as is.
    pub fn in_home(home: &Path, file_name: &Path) -> Self {
        Self::new(home.join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, line: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }

    pub fn open(&self) -> io::Result<File> {
        File::open(&self.path)
    }

    /// Every logged line, oldest first.
    pub fn entries(&self) -> io::Result<Vec<String>> {
        read_entries(self.open()?)
    }
}

/// Splits a log on `\n`. Lines that are not valid UTF-8 are decoded lossily, not rejected.
pub fn read_entries(reader: impl Read) -> io::Result<Vec<String>> {
    BufReader::new(reader)
        .split(b'\n')
        .map(|line| line.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
        .collect()
}
