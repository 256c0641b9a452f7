//! `conanfile.txt` requirements.
//!
//! Only the `[requires]` section is read:
//!
//! ```text
//! [requires]
//! zlib/1.2.11
//! fmt/10.2.1@user/stable
//!
//! [generators]
//! CMakeToolchain
//! ```

use std::fmt;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::core::error::ConanError;
use crate::util::fs;

/// Name of the manifest file in a project root.
pub const MANIFEST_NAME: &str = "conanfile.txt";

const REQUIRES_HEADER: &str = "[requires]";

/// A single declared dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    name: String,
    version: String,
    /// Tokens after `name/version` (e.g. conan `user/channel`).
    extra: Vec<String>,
}

impl Requirement {
    /// Create a requirement from a name and version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Requirement {
            name: name.into(),
            version: version.into(),
            extra: Vec::new(),
        }
    }

    /// Parse one requirement line. Returns `None` if the line has no `/`.
    pub fn parse(line: &str) -> Option<Self> {
        if !line.contains('/') {
            return None;
        }

        let mut parts = line.split('/').map(str::to_string);
        let name = parts.next().unwrap_or_default();
        let version = parts.next().unwrap_or_default();

        Some(Requirement {
            name,
            version,
            extra: parts.collect(),
        })
    }

    /// Package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Package version, as written (may carry an `@user/channel` suffix).
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Ignored trailing tokens.
    pub fn extra(&self) -> &[String] {
        &self.extra
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)?;
        for token in &self.extra {
            write!(f, "/{}", token)?;
        }
        Ok(())
    }
}

/// Read the requirements of a manifest file.
pub fn read_requirements(path: &Path) -> Result<Vec<Requirement>> {
    let contents = fs::read_to_string(path)?;
    parse_requirements(&contents, path)
}

/// Parse the `[requires]` section of manifest contents.
///
/// `path` is only used for error reporting.
pub fn parse_requirements(contents: &str, path: &Path) -> Result<Vec<Requirement>> {
    let mut requirements = Vec::new();
    let mut reading = false;

    for (idx, raw) in contents.lines().enumerate() {
        let line = raw.trim();

        if !reading {
            reading = line == REQUIRES_HEADER;
            continue;
        }

        if line.starts_with('[') {
            break;
        }
        // Blank and comment lines are not requirement lines.
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match Requirement::parse(line) {
            Some(req) => requirements.push(req),
            None => return Err(ConanError::manifest_parse(path, contents, idx + 1).into()),
        }
    }

    tracing::debug!(
        "{} requirement(s) in {}",
        requirements.len(),
        path.display()
    );

    Ok(requirements)
}
