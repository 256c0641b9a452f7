//! Core data structures for harbour-conan.
//!
//! This module contains the types the lifecycle operates on:
//! - Requirements read from `conanfile.txt`
//! - Toolchain artifacts and the package store layout
//! - The manifest cache
//! - The host project graph

pub mod artifact;
pub mod error;
pub mod project;
pub mod record;
pub mod requirement;

pub use artifact::{PackageStore, ToolchainArtifact};
pub use error::ConanError;
pub use project::{Application, PathSink, Project, ProjectGraph};
pub use record::{ManifestCache, ManifestRecord, RecordId};
pub use requirement::{Requirement, MANIFEST_NAME};
