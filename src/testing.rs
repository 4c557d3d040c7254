// src/testing.rs - doubles shared by unit tests
use crate::error::CommandError;
use crate::executor::launch::{ChildRecord, ChildStatus, Launcher};
use crate::parser::ArgVector;
use std::cell::RefCell;
use std::rc::Rc;

pub type Calls = Rc<RefCell<Vec<Vec<String>>>>;

/// Launcher that records what it was asked to run instead of spawning anything.
pub struct RecordingLauncher {
    calls: Calls,
    outcome: Option<ChildStatus>,
}

impl Default for RecordingLauncher {
    fn default() -> Self {
        Self::returning(ChildStatus::Exited(0))
    }
}

impl RecordingLauncher {
    pub fn returning(status: ChildStatus) -> Self {
        RecordingLauncher { calls: Calls::default(), outcome: Some(status) }
    }

    /// Every launch fails as if the program did not exist.
    pub fn failing() -> Self {
        RecordingLauncher { calls: Calls::default(), outcome: None }
    }

    pub fn calls(&self) -> Calls {
        Rc::clone(&self.calls)
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&mut self, argv: &ArgVector) -> Result<ChildRecord, CommandError> {
        self.calls.borrow_mut().push(argv.as_slice().to_vec());
        match self.outcome {
            Some(status) => Ok(ChildRecord { pid: 0, status }),
            None => Err(CommandError::NotFound { command: argv[0].to_string() }),
        }
    }
}
