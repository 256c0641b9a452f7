//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod fs;
pub mod process;

pub use config::{ModuleConfig, Settings};
pub use diagnostic::Diagnostic;
pub use process::{Executor, ProcessBuilder, SystemExecutor};
