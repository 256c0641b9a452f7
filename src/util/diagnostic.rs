//! Terminal reports for failed or suspicious lifecycle steps.
//!
//! A report names what went wrong, where (`file[:line]`), any lines worth
//! quoting from conan, and what to try next.

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

/// Hints attached to the errors of this crate.
pub mod suggestions {
    pub const REQUIREMENT_FORMAT: &str =
        "Write each requirement as `name/version`, e.g. `zlib/1.2.11`";

    pub const REINSTALL_PACKAGE: &str =
        "Remove the package from the conan cache and run the install again";

    pub const CONFIG_KEYS: &str =
        "Supported keys are `install`, `strategy` and `build_missing`";

    pub const INSTALL_FAILED: &str =
        "Run the command above in the project directory to see the full conan output";

    pub const PYTHON_NOT_FOUND: &str =
        "Set PYTHON (or pass --python) to an interpreter with conan installed";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    /// ANSI SGR sequence for the label.
    fn style(self) -> &'static str {
        match self {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A report printed to stderr by the CLI.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// File the report is about, with an optional 1-based line.
    pub location: Option<(PathBuf, Option<usize>)>,
    /// Quoted lines (conan stderr, the failing command, ...)
    pub notes: Vec<String>,
    pub help: Vec<String>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            message: message.into(),
            location: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Warning, message)
    }

    /// Quote one more line under the message.
    pub fn with_context(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    /// Point at a file.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some((path.into(), None));
        self
    }

    /// Point at a line of a file.
    pub fn with_line(mut self, path: impl Into<PathBuf>, line: usize) -> Self {
        self.location = Some((path.into(), Some(line)));
        self
    }

    /// Render for a terminal, with ANSI colors if `color` is set.
    pub fn format(&self, color: bool) -> String {
        let paint = |style: &str, text: &str| {
            if color {
                format!("\x1b[{}m{}\x1b[0m", style, text)
            } else {
                text.to_string()
            }
        };

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}: {}",
            paint(self.severity.style(), self.severity.label()),
            self.message
        );

        if let Some((path, line)) = &self.location {
            let _ = writeln!(out, "  --> {}", display_location(path, *line));
        }
        for note in &self.notes {
            let _ = writeln!(out, "   | {}", note);
        }
        for help in &self.help {
            let _ = writeln!(out, "  {}: {}", paint("1;36", "help"), help);
        }

        out
    }
}

fn display_location(path: &Path, line: Option<usize>) -> String {
    match line {
        Some(line) => format!("{}:{}", path.display(), line),
        None => path.display().to_string(),
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
