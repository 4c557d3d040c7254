// src/executor/launch.rs - runs external programs as child processes
use crate::error::CommandError;
use crate::parser::ArgVector;
use std::io;
use std::process::Command as Proc;

/// How a child left the running state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStatus {
    Exited(i32),
    Signaled(i32),
    Stopped(i32),
}

/// A child after its single wait. Nothing outlives the launch that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRecord {
    pub pid: u32,
    pub status: ChildStatus,
}

/// Starts an external command and blocks until it reaches a terminal state.
pub trait Launcher {
    fn launch(&mut self, argv: &ArgVector) -> Result<ChildRecord, CommandError>;
}

/// Launcher backed by real processes. Children inherit stdio, environment and cwd.
#[derive(Debug, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&mut self, argv: &ArgVector) -> Result<ChildRecord, CommandError> {
        let args = argv.as_slice();
        let Some(program) = args.first() else {
            return Err(CommandError::NotFound { command: String::new() });
        };

        // Children expect a cooked terminal.
        crossterm::terminal::disable_raw_mode().ok();

        let child = Proc::new(program)
            .args(&args[1..])
            .spawn()
            .map_err(|e| spawn_error(program, e))?;
        let pid = child.id();
        tracing::debug!(pid, command = %program, "spawned");

        let status = wait_for(child).map_err(|source| CommandError::Wait {
            command: program.clone(),
            source,
        })?;
        tracing::debug!(pid, ?status, "child finished");

        Ok(ChildRecord { pid, status })
    }
}

fn spawn_error(program: &str, e: io::Error) -> CommandError {
    let command = program.to_string();
    match e.kind() {
        io::ErrorKind::NotFound => CommandError::NotFound { command },
        io::ErrorKind::PermissionDenied => CommandError::PermissionDenied { command },
        _ => CommandError::Spawn { command, source: e },
    }
}

/// Blocks in waitpid(WUNTRACED) so a stopped child hands control back too.
///
/// The `Child` handle is dropped without waiting; dropping never reaps or kills.
#[cfg(unix)]
fn wait_for(child: std::process::Child) -> io::Result<ChildStatus> {
    let pid = child.id() as libc::pid_t;
    drop(child);

    loop {
        let mut status: libc::c_int = 0;
        let rc = unsafe { libc::waitpid(pid, &mut status, libc::WUNTRACED) };
        if rc == -1 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(err);
        }

        if libc::WIFEXITED(status) {
            return Ok(ChildStatus::Exited(libc::WEXITSTATUS(status)));
        }
        if libc::WIFSIGNALED(status) {
            return Ok(ChildStatus::Signaled(libc::WTERMSIG(status)));
        }
        if libc::WIFSTOPPED(status) {
            return Ok(ChildStatus::Stopped(libc::WSTOPSIG(status)));
        }
    }
}

#[cfg(not(unix))]
fn wait_for(mut child: std::process::Child) -> io::Result<ChildStatus> {
    let status = child.wait()?;
    Ok(ChildStatus::Exited(status.code().unwrap_or(-1)))
}
