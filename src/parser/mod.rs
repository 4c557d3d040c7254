// src/parser/mod.rs
// Splits one input line into an argument vector. No quoting, escaping or expansion.

use crate::error::ShellError;
use std::ops::Index;

/// The tokenized form of one input line. The first element, if any, is the command name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgVector(Vec<String>);

impl ArgVector {
    pub fn command(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Everything after the command name.
    pub fn args(&self) -> &[String] {
        self.0.get(1..).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Index<usize> for ArgVector {
    type Output = str;

    fn index(&self, i: usize) -> &str {
        &self.0[i]
    }
}

impl From<Vec<String>> for ArgVector {
    fn from(tokens: Vec<String>) -> Self {
        ArgVector(tokens.into_iter().filter(|t| !t.is_empty()).collect())
    }
}

/// Drop one trailing line terminator (`\n` or `\r\n`).
pub fn strip_newline(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => line,
    }
}

/// Tokenize a line on spaces. Runs of delimiters collapse, so no token is ever empty.
///
/// Tabs and other whitespace split as well, which keeps every token free of
/// internal whitespace. Storage is reserved fallibly; running out of memory is
/// returned to the caller instead of aborting.
pub fn tokenize(line: &str) -> Result<ArgVector, ShellError> {
    let line = strip_newline(line);
    let words = line.split(char::is_whitespace).filter(|w| !w.is_empty());

    let mut tokens: Vec<String> = Vec::new();
    tokens.try_reserve_exact(words.clone().count())?;

    for word in words {
        let mut token = String::new();
        token.try_reserve_exact(word.len())?;
        token.push_str(word);
        tokens.push(token);
    }

    Ok(ArgVector(tokens))
}
