//! harbour-conan - conan dependency installation for Harbour projects
//!
//! This crate provides a build-tool module that reads a project's
//! `conanfile.txt`, runs `conan install` when the install artifacts are
//! missing, and hands the resulting include and library directories to the
//! project and every project that depends on it.

pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for harbour-conan unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a mock process executor and on-disk
/// project fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{
    artifact::ToolchainArtifact, error::ConanError, project::Application,
    requirement::Requirement,
};
pub use ops::module::{ConanModule, Module, ModuleRegistry};
pub use util::config::{ModuleConfig, Settings};
