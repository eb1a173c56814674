//! User-friendly diagnostic messages.
//!
//! Every error shown to the user carries the root cause, any context lines,
//! and a suggested fix where one exists.

use std::fmt;
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when a package manifest cannot be parsed.
    pub const MALFORMED_MANIFEST: &str =
        "Fix the JSON syntax of the manifest, or remove it to skip the package";

    /// Suggestion when two packages share a name.
    pub const DUPLICATE_NAME: &str =
        "Rename one of the packages, or drop `duplicates = \"error\"` to let the last one win";

    /// Suggestion when the packages directory is missing.
    pub const NO_PACKAGES_DIR: &str =
        "help: Pass `--packages-dir` or set `packages-dir` in wsalias.toml";

    /// Suggestion when discovery finds nothing.
    pub const NO_PACKAGES: &str =
        "Give each package a manifest with a `name`, or point `--packages-dir` elsewhere";

    /// Suggestion when a package has no source directory.
    pub const MISSING_SOURCE_DIR: &str =
        "help: Create the source directory or set `source-dir` in wsalias.toml";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Point the diagnostic at a file.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Render for the terminal, with ANSI colors when `color` is set.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail
        let _ = self.render(&mut output, color);
        output
    }

    fn render(&self, out: &mut impl fmt::Write, color: bool) -> fmt::Result {
        let code = match self.severity {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
        };
        writeln!(out, "{}: {}", paint(color, code, self.severity), self.message)?;

        if let Some(path) = &self.location {
            writeln!(out, "  --> {}", path.display())?;
        }
        for line in &self.context {
            writeln!(out, "  = {}", line)?;
        }

        let help = paint(color, "1;32", "help");
        match self.suggestions.as_slice() {
            [] => Ok(()),
            [only] => writeln!(out, "{}: {}", help, only),
            many => {
                writeln!(out, "{}: one of:", help)?;
                for (i, suggestion) in many.iter().enumerate() {
                    writeln!(out, "  {}. {}", i + 1, suggestion)?;
                }
                Ok(())
            }
        }
    }
}

fn paint(color: bool, code: &str, text: impl fmt::Display) -> String {
    if color {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, false)
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("duplicate package name `@org/a`")
            .with_location("packages/a/package.json")
            .with_context("declared in packages/a")
            .with_context("declared in packages/a-next")
            .with_suggestion("Rename one of the packages");

        let output = diag.format(false);
        assert!(output.contains("error: duplicate package name"));
        assert!(output.contains("--> packages/a/package.json"));
        assert!(output.contains("= declared in packages/a-next"));
        assert!(output.contains("help: Rename one of the packages"));
    }

    #[test]
    fn test_multiple_suggestions_are_numbered() {
        let output = Diagnostic::error("no packages found")
            .with_suggestion("Add a package.json")
            .with_suggestion("Pass --packages-dir")
            .format(false);

        assert!(output.contains("help: one of:"));
        assert!(output.contains("  2. Pass --packages-dir"));
    }

    #[test]
    fn test_colored_severity() {
        let output = Diagnostic::warning("no packages found").format(true);
        assert!(output.starts_with("\x1b[1;33mwarning\x1b[0m: no packages found"));
    }

    #[test]
    fn test_warning_severity() {
        let diag = Diagnostic::warning("no packages found");
        assert_eq!(diag.severity, Severity::Warning);
        assert!(diag.to_string().starts_with("warning: no packages found"));
    }
}
