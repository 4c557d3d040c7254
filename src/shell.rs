// src/shell.rs
use crate::error::ShellError;
use crate::executor::{self, launch::Launcher};
use crate::history::HistoryLog;
use crate::parser;
use crate::readline::LineSource;
use nu_ansi_term::Color;
use std::fmt::Display;
use std::io::Write;

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Terminate,
}

pub struct Shell {
    history: HistoryLog,
    launcher: Box<dyn Launcher>,
    color: bool,
}

impl Shell {
    pub fn new(history: HistoryLog, launcher: Box<dyn Launcher>) -> Self {
        Shell { history, launcher, color: false }
    }

    /// Paint diagnostics red.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn launcher(&mut self) -> &mut dyn Launcher {
        self.launcher.as_mut()
    }

    /// One-line diagnostic on stderr.
    pub fn report(&self, msg: &dyn Display) {
        let line = format!("jssh: {}", msg);
        if self.color {
            eprintln!("{}", Color::Red.paint(line));
        } else {
            eprintln!("{}", line);
        }
    }

    /// Read-eval loop. Returns once the source runs dry or a command asks to stop.
    pub fn run(&mut self, source: &mut dyn LineSource, out: &mut dyn Write) -> Result<(), ShellError> {
        tracing::info!(history = %self.history.path().display(), "interpreter started");

        while let Some(line) = source.next_line().map_err(ShellError::Input)? {
            if self.eval(&line, out)? == Flow::Terminate {
                tracing::info!("exit requested");
                return Ok(());
            }
        }

        tracing::info!("end of input");
        Ok(())
    }

    /// Tokenize and dispatch a single line, then log it. Blank lines do nothing.
    pub fn eval(&mut self, line: &str, out: &mut dyn Write) -> Result<Flow, ShellError> {
        let argv = parser::tokenize(line)?;
        if argv.is_empty() {
            return Ok(Flow::Continue);
        }

        let flow = executor::execute(self, &argv, out);
        self.record(parser::strip_newline(line));
        Ok(flow)
    }

    fn record(&self, line: &str) {
        if let Err(e) = self.history.append(line) {
            tracing::warn!(error = %e, path = %self.history.path().display(), "history append failed");
            self.report(&format!("history: cannot write {}: {}", self.history.path().display(), e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readline::ReaderSource;
    use crate::testing::RecordingLauncher;
    use serial_test::serial;
    use std::io::Cursor;

    struct Fixture {
        shell: Shell,
        calls: crate::testing::Calls,
        dir: tempfile::TempDir,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let launcher = RecordingLauncher::default();
        let calls = launcher.calls();
        let log = HistoryLog::new(dir.path().join(".jssh_history"));
        Fixture { shell: Shell::new(log, Box::new(launcher)), calls, dir }
    }

    fn run_script(fx: &mut Fixture, script: &str) -> String {
        let mut source = ReaderSource::new(Cursor::new(script.to_string()));
        let mut out = Vec::new();
        fx.shell.run(&mut source, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn logged(fx: &Fixture) -> String {
        std::fs::read_to_string(fx.dir.path().join(".jssh_history")).unwrap_or_default()
    }

    #[test]
    fn blank_lines_do_nothing() {
        let mut fx = fixture();
        let out = run_script(&mut fx, "\n   \n\t\n");

        assert!(out.is_empty());
        assert!(fx.calls.borrow().is_empty());
        assert_eq!(logged(&fx), "");
    }

    #[test]
    fn external_commands_are_launched_in_order() {
        let mut fx = fixture();
        run_script(&mut fx, "ls -la /tmp\necho hi\n");

        let calls = fx.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ["ls", "-la", "/tmp"]);
        assert_eq!(calls[1], ["echo", "hi"]);
    }

    #[test]
    fn end_of_input_stops_without_exit() {
        let mut fx = fixture();
        run_script(&mut fx, "true\n");
        assert_eq!(fx.calls.borrow().len(), 1);
    }

    #[test]
    fn last_line_without_newline_still_runs() {
        let mut fx = fixture();
        run_script(&mut fx, "true\nfalse");
        assert_eq!(fx.calls.borrow().len(), 2);
        assert_eq!(logged(&fx), "true\nfalse\n");
    }

    #[test]
    fn exit_stops_the_loop() {
        let mut fx = fixture();
        let out = run_script(&mut fx, "first\nexit 3\nsecond\nhelp\n");

        assert_eq!(*fx.calls.borrow(), vec![vec!["first".to_string()]]);
        assert!(out.is_empty());
        assert_eq!(logged(&fx), "first\nexit 3\n");
    }

    #[test]
    #[serial]
    fn history_lists_prior_lines_in_order() {
        let before = std::env::current_dir().unwrap();
        let mut fx = fixture();
        let target = fx.dir.path().to_path_buf();

        let script = format!("cd {}\nhelp\nhistory\n", target.display());
        let out = run_script(&mut fx, &script);
        std::env::set_current_dir(before).unwrap();

        let expected_tail = format!("cd {}\nhelp\n", target.display());
        assert!(out.ends_with(&expected_tail), "unexpected output:\n{out}");
        assert!(fx.calls.borrow().is_empty());
    }

    #[test]
    fn failing_commands_keep_the_loop_going() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = RecordingLauncher::failing();
        let calls = launcher.calls();
        let log = HistoryLog::new(dir.path().join(".jssh_history"));
        let mut shell = Shell::new(log, Box::new(launcher));

        let mut source = ReaderSource::new(Cursor::new("not_a_real_command_xyz\nhistory\n"));
        let mut out = Vec::new();
        shell.run(&mut source, &mut out).unwrap();

        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(String::from_utf8(out).unwrap(), "not_a_real_command_xyz\n");
    }

    #[test]
    fn unwritable_history_does_not_fail_the_line() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = RecordingLauncher::default();
        let calls = launcher.calls();
        let log = HistoryLog::new(dir.path().join("no-such-dir").join("history"));
        let mut shell = Shell::new(log, Box::new(launcher));

        let flow = shell.eval("make\n", &mut Vec::new()).unwrap();

        assert_eq!(flow, Flow::Continue);
        assert_eq!(calls.borrow().len(), 1);
    }
}
