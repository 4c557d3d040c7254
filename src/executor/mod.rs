// src/executor/mod.rs - decides between builtins and external programs
pub mod builtin;
pub mod launch;

use crate::error::CommandError;
use crate::parser::ArgVector;
use crate::shell::{Flow, Shell};
use builtin::Builtin;
use launch::{ChildRecord, ChildStatus};
use std::io::Write;

/// Run one non-empty argument vector. Per-command failures are reported here and
/// never escape; the caller only sees whether to keep going.
pub fn execute(shell: &mut Shell, argv: &ArgVector, out: &mut dyn Write) -> Flow {
    let Some(name) = argv.command() else { return Flow::Continue };

    let result = match Builtin::lookup(name) {
        Some(builtin) => {
            tracing::debug!(builtin = name, "running builtin");
            builtin.run(shell.history(), argv, out)
        }
        None => run_external(shell, argv, out),
    };

    if let Err(e) = out.flush() {
        shell.report(&CommandError::Output(e));
    }

    match result {
        Ok(flow) => flow,
        Err(e) => {
            shell.report(&e);
            Flow::Continue
        }
    }
}

fn run_external(shell: &mut Shell, argv: &ArgVector, out: &mut dyn Write) -> Result<Flow, CommandError> {
    // Anything a builtin printed must land before the child writes.
    out.flush()?;

    let record = shell.launcher().launch(argv)?;
    describe(shell, &argv[0], record);
    Ok(Flow::Continue)
}

fn describe(shell: &Shell, command: &str, record: ChildRecord) {
    match record.status {
        ChildStatus::Exited(0) => {}
        ChildStatus::Exited(code) => {
            tracing::debug!(command, code, "command failed");
        }
        ChildStatus::Signaled(signal) => {
            shell.report(&format!("{}: terminated by signal {}", command, signal));
        }
        ChildStatus::Stopped(signal) => {
            shell.report(&format!("{}: stopped by signal {} (pid {})", command, signal, record.pid));
        }
    }
}
