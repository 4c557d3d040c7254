// src/readline/mod.rs
// Line sources: an interactive editor with recall and completion, or a plain reader for scripts.

use reedline::{
    default_emacs_keybindings, ColumnarMenu, Completer, DefaultHinter, Emacs, FileBackedHistory,
    History, HistoryItem, KeyCode, KeyModifiers, MenuBuilder, Prompt, PromptEditMode,
    PromptHistorySearch, PromptHistorySearchStatus, Reedline, ReedlineEvent, ReedlineMenu,
    Signal, Span, Suggestion,
};
use std::borrow::Cow;
use std::io::{self, BufRead};

use crate::completion;

/// Where the interpreter gets its input.
pub trait LineSource {
    /// Next line, or `None` at end of input.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

// ── Plain reader ─────────────────────────────────────────────────────────────

/// Reads lines from any buffered reader, e.g. a script piped into stdin.
/// Bytes that are not UTF-8 become U+FFFD instead of ending the input.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(String::from_utf8_lossy(&buf).into_owned())),
        }
    }
}

// ── Prompt ───────────────────────────────────────────────────────────────────

pub struct ShellPrompt {
    pub text: String,
}

impl Prompt for ShellPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }
    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }
    fn render_prompt_indicator(&self, _mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }
    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("> ")
    }
    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!("({}reverse-i-search: {}) ", prefix, history_search.term))
    }
}

// ── Tab completion ───────────────────────────────────────────────────────────

pub struct ShellCompleter;

impl Completer for ShellCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let before_cursor = &line[..pos];
        let word_start = before_cursor.rfind(' ').map(|i| i + 1).unwrap_or(0);
        let partial = &before_cursor[word_start..];
        let is_first_word = before_cursor[..word_start].trim().is_empty();

        completion::complete(partial, is_first_word)
            .into_iter()
            .map(|c| Suggestion {
                value: c.value,
                description: c.builtin.then(|| "builtin".to_string()),
                style: None,
                extra: None,
                span: Span::new(word_start, pos),
                append_whitespace: c.append_space,
            })
            .collect()
    }
}

// ── Interactive editor ───────────────────────────────────────────────────────

pub struct Editor {
    editor: Reedline,
    prompt: ShellPrompt,
}

impl Editor {
    /// `recall` seeds the in-memory history used for arrow-key and Ctrl+R recall.
    pub fn new(prompt: &str, capacity: usize, recall: &[String]) -> Self {
        let history = Box::new(seeded_history(capacity, recall));

        let completion_menu = Box::new(ColumnarMenu::default().with_name("completion_menu"));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu("completion_menu".to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let editor = Reedline::create()
            .with_history(history)
            .with_completer(Box::new(ShellCompleter))
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_edit_mode(Box::new(Emacs::new(keybindings)))
            .with_hinter(Box::new(
                DefaultHinter::default().with_style(
                    nu_ansi_term::Style::new()
                        .italic()
                        .fg(nu_ansi_term::Color::DarkGray),
                ),
            ));

        Editor {
            editor,
            prompt: ShellPrompt { text: prompt.to_string() },
        }
    }
}

fn seeded_history(capacity: usize, recall: &[String]) -> FileBackedHistory {
    let mut history = match FileBackedHistory::new(capacity.max(1)) {
        Ok(h) => h,
        Err(e) => {
            tracing::warn!(error = %e, capacity, "falling back to default recall capacity");
            FileBackedHistory::default()
        }
    };
    let skip = recall.len().saturating_sub(capacity);
    for line in &recall[skip..] {
        if let Err(e) = history.save(HistoryItem::from_command_line(line.as_str())) {
            tracing::warn!(error = %e, "could not seed recall history");
            break;
        }
    }
    history
}

impl LineSource for Editor {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        loop {
            match self.editor.read_line(&self.prompt) {
                Ok(Signal::Success(line)) => return Ok(Some(line)),
                // Ctrl+C drops the current input and shows a fresh prompt.
                Ok(Signal::CtrlC) => continue,
                Ok(Signal::CtrlD) => return Ok(None),
                Err(e) => return Err(e),
            }
        }
    }
}
