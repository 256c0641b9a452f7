//! Include and library paths recovered from conan's install output.
//!
//! Two layouts are understood:
//!
//! - the generated CMake toolchain file
//!   (`build/generators/conan_toolchain.cmake`), whose
//!   `CMAKE_INCLUDE_PATH` / `CMAKE_LIBRARY_PATH` assignments list the
//!   directories;
//! - the per-user package store, where every package lives under
//!   `<store>/<name>/<version>/package/<hash>/{include,lib}`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::core::error::ConanError;
use crate::core::requirement::Requirement;
use crate::util::fs;

const INCLUDE_MARKER: &str = "CMAKE_INCLUDE_PATH";
const LIBRARY_MARKER: &str = "CMAKE_LIBRARY_PATH";

/// Include and library directories of the installed requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToolchainArtifact {
    pub include_dirs: Vec<PathBuf>,
    pub lib_dirs: Vec<PathBuf>,
}

impl ToolchainArtifact {
    /// True if neither list has an entry.
    pub fn is_empty(&self) -> bool {
        self.include_dirs.is_empty() && self.lib_dirs.is_empty()
    }

    /// Append another artifact's directories, keeping order.
    pub fn extend(&mut self, other: ToolchainArtifact) {
        self.include_dirs.extend(other.include_dirs);
        self.lib_dirs.extend(other.lib_dirs);
    }
}

/// Read and parse a generated toolchain file.
pub fn read_toolchain_file(path: &Path) -> Result<ToolchainArtifact> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_toolchain(&contents))
}

/// Extract the include and library path lists from toolchain file contents.
///
/// The first line mentioning each variable wins; scanning stops once both
/// lists are populated.
pub fn parse_toolchain(contents: &str) -> ToolchainArtifact {
    let mut artifact = ToolchainArtifact::default();

    for line in contents.lines() {
        if artifact.include_dirs.is_empty() && line.contains(INCLUDE_MARKER) {
            artifact.include_dirs = parse_cmake_var(INCLUDE_MARKER, line);
        }
        if artifact.lib_dirs.is_empty() && line.contains(LIBRARY_MARKER) {
            artifact.lib_dirs = parse_cmake_var(LIBRARY_MARKER, line);
        }
        if !artifact.include_dirs.is_empty() && !artifact.lib_dirs.is_empty() {
            break;
        }
    }

    artifact
}

/// Parse the quoted value list that follows `marker` on `line`.
///
/// `set(CMAKE_INCLUDE_PATH "/a/b" "/c/d")` yields `["/a/b", "/c/d"]`.
fn parse_cmake_var(marker: &str, line: &str) -> Vec<PathBuf> {
    let Some(start) = line.find(marker) else {
        return Vec::new();
    };
    // Skip the separator after the variable name.
    let offset = start + marker.len() + 1;
    let Some(rest) = line.get(offset..) else {
        return Vec::new();
    };

    split_escaped(rest, ' ')
        .into_iter()
        .filter_map(|token| {
            let mut chars = token.chars();
            chars.next()?;
            chars.next_back()?;
            let value = chars.as_str();
            let value = value.strip_suffix('"').unwrap_or(value);
            (!value.is_empty()).then(|| PathBuf::from(value))
        })
        .collect()
}

/// Split on `delim` unless it is escaped with a backslash.
fn split_escaped(s: &str, delim: char) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' && chars.peek() == Some(&delim) {
            current.push(delim);
            chars.next();
        } else if ch == delim {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// The per-user conan package store.
#[derive(Debug, Clone)]
pub struct PackageStore {
    root: PathBuf,
}

impl PackageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        PackageStore { root: root.into() }
    }

    /// `<store>/<name>/<version>/package`
    pub fn package_dir(&self, req: &Requirement) -> PathBuf {
        self.root
            .join(req.name())
            .join(req.version())
            .join("package")
    }

    /// Check if the package directory of a requirement exists.
    pub fn has_package(&self, req: &Requirement) -> bool {
        self.package_dir(req).is_dir()
    }

    /// Collect the directories of all requirements, in manifest order.
    ///
    /// Requirements that are not in the store are skipped.
    pub fn read(&self, requirements: &[Requirement]) -> Result<ToolchainArtifact> {
        let mut artifact = ToolchainArtifact::default();

        for req in requirements {
            let dir = self.package_dir(req);
            if !dir.is_dir() {
                tracing::warn!("{} is not in the package store ({})", req, dir.display());
                continue;
            }
            artifact.extend(resolve_package_dir(&dir)?);
        }

        Ok(artifact)
    }
}

/// Resolve `include` and `lib` inside a package directory.
///
/// The package directory must hold exactly one entry, the package hash
/// directory. Only subdirectories that exist are returned.
pub fn resolve_package_dir(package_dir: &Path) -> Result<ToolchainArtifact> {
    let entries = fs::entries(package_dir)?;
    let hash_dir = match entries.as_slice() {
        [only] if only.is_dir() => only,
        _ => {
            return Err(ConanError::InconsistentPackageData {
                dir: package_dir.to_path_buf(),
                found: entries.len(),
            }
            .into())
        }
    };

    let mut artifact = ToolchainArtifact::default();

    let include = hash_dir.join("include");
    if include.is_dir() {
        artifact.include_dirs.push(include);
    }
    let lib = hash_dir.join("lib");
    if lib.is_dir() {
        artifact.lib_dirs.push(lib);
    }

    Ok(artifact)
}
