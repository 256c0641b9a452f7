//! High-level operations.
//!
//! This module contains the install decision, path propagation and the
//! module lifecycle built on top of them.

pub mod install;
pub mod module;
pub mod propagate;

pub use install::{decide, install_command, run_install, ArtifactStrategy, InstallDecision};
pub use module::{ConanModule, Module, ModuleRegistry};
pub use propagate::{propagate, PropagationSummary};
