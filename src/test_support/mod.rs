//! Test utilities and mocks for harbour-conan unit tests.
//!
//! [`MockExecutor`] stands in for the python/conan process: it records
//! every command and can play conan's part by writing a toolchain file
//! into the child's working directory.
//!
//! # Example
//!
//! ```rust,ignore
//! let exec = MockExecutor::succeeding().with_toolchain(toolchain_contents(&inc, &lib));
//! let mut module = ConanModule::with_executor(settings, Box::new(exec.clone()));
//! module.init(&mut app, &toml::Table::new())?;
//! assert_eq!(exec.calls().len(), 1);
//! ```

pub mod fixtures;

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::util::config::TOOLCHAIN_FILE;
use crate::util::fs::write_string;
use crate::util::process::{Executor, ProcessBuilder, ProcessOutcome};

pub use fixtures::*;

/// A command seen by [`MockExecutor`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    /// Full command line as displayed in errors.
    pub command: String,
    /// Parent working directory at the time of the call.
    pub parent_cwd: Option<PathBuf>,
}

#[derive(Debug, Clone)]
enum MockBehavior {
    Exit { code: i32, stderr: String },
    SpawnError,
}

/// Mock process executor.
///
/// Clones share the call log, so a test can keep one handle while the
/// module owns another.
#[derive(Debug, Clone)]
pub struct MockExecutor {
    behavior: MockBehavior,
    toolchain: Option<String>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockExecutor {
    /// Every command exits with status 0.
    pub fn succeeding() -> Self {
        MockExecutor {
            behavior: MockBehavior::Exit {
                code: 0,
                stderr: String::new(),
            },
            toolchain: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every command exits with `code` and prints `stderr`.
    pub fn failing(code: i32, stderr: impl Into<String>) -> Self {
        MockExecutor {
            behavior: MockBehavior::Exit {
                code,
                stderr: stderr.into(),
            },
            ..MockExecutor::succeeding()
        }
    }

    /// Every command fails to start.
    pub fn unspawnable() -> Self {
        MockExecutor {
            behavior: MockBehavior::SpawnError,
            ..MockExecutor::succeeding()
        }
    }

    /// On success, write `contents` as the toolchain file of the child's
    /// working directory, like `conan install` does.
    pub fn with_toolchain(mut self, contents: impl Into<String>) -> Self {
        self.toolchain = Some(contents.into());
        self
    }

    /// Commands run so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Executor for MockExecutor {
    fn run(&mut self, cmd: &ProcessBuilder) -> io::Result<ProcessOutcome> {
        self.calls.lock().unwrap().push(RecordedCall {
            program: cmd.get_program().to_path_buf(),
            args: cmd.get_args().to_vec(),
            cwd: cmd.get_cwd().map(PathBuf::from),
            command: cmd.display_command(),
            parent_cwd: std::env::current_dir().ok(),
        });

        match &self.behavior {
            MockBehavior::SpawnError => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: not found", cmd.get_program().display()),
            )),
            MockBehavior::Exit { code, stderr } => {
                if *code == 0 {
                    if let (Some(contents), Some(cwd)) = (&self.toolchain, cmd.get_cwd()) {
                        write_string(&cwd.join(TOOLCHAIN_FILE), contents)
                            .map_err(io::Error::other)?;
                    }
                }
                Ok(ProcessOutcome {
                    code: Some(*code),
                    stdout: String::new(),
                    stderr: stderr.clone(),
                })
            }
        }
    }
}
