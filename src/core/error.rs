//! Error types raised by the conan module.
//!
//! Library functions return `anyhow::Result`; the failures a host may want
//! to react to are raised as [`ConanError`] and can be recovered with
//! `downcast_ref::<ConanError>()`.

use std::path::PathBuf;

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Fatal conditions of a lifecycle call.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ConanError {
    /// A `[requires]` line has no `/` between name and version.
    #[error("manifest is invalid: {}:{line}: expected `name/version`", .path.display())]
    #[diagnostic(
        code(harbour_conan::manifest::invalid_requirement),
        help("requirements are written as `name/version`, e.g. `zlib/1.2.11`")
    )]
    ManifestParse {
        path: PathBuf,
        line: usize,
        #[source_code]
        src: NamedSource<String>,
        #[label("missing `/`")]
        span: SourceSpan,
    },

    /// The package store does not have the single hash directory layout.
    #[error(
        "inconsistent package data in {}: expected exactly one package directory, found {found} entries",
        .dir.display()
    )]
    #[diagnostic(code(harbour_conan::store::inconsistent))]
    InconsistentPackageData { dir: PathBuf, found: usize },

    /// The module configuration node does not match the schema.
    #[error("invalid conan module configuration: {message}")]
    #[diagnostic(code(harbour_conan::config::invalid))]
    ConfigValidation { message: String },

    /// `conan install` ran but did not succeed.
    #[error("`{command}` failed with exit code {}", .code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    #[diagnostic(code(harbour_conan::install::failed))]
    InstallFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// `conan install` could not be started at all.
    #[error("failed to spawn `{command}`")]
    #[diagnostic(code(harbour_conan::install::spawn))]
    InstallSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// No module factory is registered under this name.
    #[error("unknown module `{name}`")]
    #[diagnostic(code(harbour_conan::module::unknown))]
    UnknownModule { name: String },
}

impl ConanError {
    /// Build a `ManifestParse` error pointing at `line` (1-based) of `contents`.
    pub fn manifest_parse(path: impl Into<PathBuf>, contents: &str, line: usize) -> Self {
        let path = path.into();
        let offset: usize = contents
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum();
        let len = contents[offset..]
            .lines()
            .next()
            .map_or(0, str::len);

        ConanError::ManifestParse {
            src: NamedSource::new(path.display().to_string(), contents.to_string()),
            path,
            line,
            span: (offset, len).into(),
        }
    }

    /// Convert to a user-facing diagnostic with suggestions.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ConanError::ManifestParse { path, line, .. } => {
                Diagnostic::error("manifest is invalid")
                    .with_line(path.clone(), *line)
                    .with_context(format!("line {} is not of the form `name/version`", line))
                    .with_suggestion(suggestions::REQUIREMENT_FORMAT)
            }
            ConanError::InconsistentPackageData { dir, found } => {
                Diagnostic::error("inconsistent package data")
                    .with_location(dir.clone())
                    .with_context(format!(
                        "expected one package directory, found {} entries",
                        found
                    ))
                    .with_suggestion(suggestions::REINSTALL_PACKAGE)
            }
            ConanError::ConfigValidation { message } => {
                Diagnostic::error(format!("invalid conan module configuration: {}", message))
                    .with_suggestion(suggestions::CONFIG_KEYS)
            }
            ConanError::InstallFailed {
                command, stderr, ..
            } => {
                let mut diag = Diagnostic::error(self.to_string());
                for line in stderr.lines().filter(|l| !l.trim().is_empty()).take(10) {
                    diag = diag.with_context(line.to_string());
                }
                diag.with_context(format!("command: {}", command))
                    .with_suggestion(suggestions::INSTALL_FAILED)
            }
            ConanError::InstallSpawn { command, source } => {
                Diagnostic::error(format!("failed to spawn `{}`", command))
                    .with_context(source.to_string())
                    .with_suggestion(suggestions::PYTHON_NOT_FOUND)
            }
            ConanError::UnknownModule { name } => {
                Diagnostic::error(format!("unknown module `{}`", name))
            }
        }
    }
}
