// src/executor/builtin/mod.rs
mod core;

use crate::error::CommandError;
use crate::history::HistoryLog;
use crate::parser::ArgVector;
use crate::shell::Flow;
use std::io::Write;

/// Commands implemented in-process. Running one never spawns a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Cd,
    Exit,
    History,
    Help,
}

impl Builtin {
    pub const ALL: [Builtin; 4] = [Builtin::Cd, Builtin::Exit, Builtin::History, Builtin::Help];

    pub fn lookup(name: &str) -> Option<Builtin> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Cd      => "cd",
            Builtin::Exit    => "exit",
            Builtin::History => "history",
            Builtin::Help    => "help",
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Builtin::Cd      => "cd [dir]",
            Builtin::Exit    => "exit",
            Builtin::History => "history",
            Builtin::Help    => "help",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Builtin::Cd      => "change the working directory ($HOME when omitted)",
            Builtin::Exit    => "leave the shell",
            Builtin::History => "list previously entered commands",
            Builtin::Help    => "show this help",
        }
    }

    pub fn run(
        self,
        history: &HistoryLog,
        argv: &ArgVector,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        match self {
            Builtin::Cd => {
                let home = std::env::var_os("HOME");
                core::builtin_cd(argv, home.as_deref().map(std::path::Path::new))?;
            }
            Builtin::Exit => return Ok(Flow::Terminate),
            Builtin::History => core::builtin_history(history, out)?,
            Builtin::Help => core::builtin_help(out)?,
        }
        Ok(Flow::Continue)
    }
}
