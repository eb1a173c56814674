//! Workspace health checks.
//!
//! Discovery never looks inside the aliased source directories. `check`
//! does, so a missing `src` shows up here rather than as an unresolved
//! import in the bundler.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::core::workspace::{Discovery, SkippedPackage};
use crate::util::diagnostic::suggestions;
use crate::util::fs::display_path;

/// Result of checking one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Package name
    pub name: String,

    /// Aliased source directory
    pub path: PathBuf,

    /// Whether the check passed
    pub passed: bool,

    /// Human-readable status message
    pub message: String,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>, path: PathBuf) -> Self {
        CheckResult {
            name: name.into(),
            path,
            passed: true,
            message: "source directory present".to_string(),
        }
    }

    /// Create a failing check result.
    pub fn fail(name: impl Into<String>, path: PathBuf, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            path,
            passed: false,
            message: message.into(),
        }
    }
}

/// Summary of all checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Scanned packages directory
    pub root: PathBuf,

    /// One result per discovered package, in discovery order
    pub checks: Vec<CheckResult>,

    /// Directories that contributed no package
    pub skipped: Vec<SkippedPackage>,
}

impl CheckReport {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }
}

/// Verify that every aliased source directory exists.
pub fn check_workspace(discovery: &Discovery) -> CheckReport {
    let checks = discovery
        .aliases()
        .iter()
        .map(|(name, path)| check_source_dir(name, path))
        .collect();

    CheckReport {
        root: discovery.root().to_path_buf(),
        checks,
        skipped: discovery.skipped().to_vec(),
    }
}

fn check_source_dir(name: &str, path: &Path) -> CheckResult {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => CheckResult::pass(name, path.to_path_buf()),
        Ok(_) => CheckResult::fail(name, path.to_path_buf(), "source path is not a directory"),
        Err(e) => {
            tracing::debug!("{}: {}", path.display(), e);
            CheckResult::fail(name, path.to_path_buf(), "source directory missing")
        }
    }
}

/// Format a check report for display.
pub fn format_report(report: &CheckReport, verbose: bool) -> String {
    let mut output = String::new();

    for check in &report.checks {
        let status = if check.passed { "[OK]" } else { "[!!]" };
        let _ = writeln!(output, "  {} {}", status, check.name);

        if verbose || !check.passed {
            let _ = writeln!(
                output,
                "      {}: {}",
                check.message,
                display_path(&report.root, &check.path)
            );
        }
    }

    if verbose {
        for skipped in &report.skipped {
            let _ = writeln!(
                output,
                "  [--] {} ({})",
                display_path(&report.root, &skipped.dir),
                skipped.reason
            );
        }
    }

    let _ = writeln!(
        output,
        "\nSummary: {} passed, {} failed",
        report.passed_count(),
        report.failed_count()
    );

    if !report.all_passed() {
        let _ = writeln!(output, "{}", suggestions::MISSING_SOURCE_DIR);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::workspace::{discover, DiscoveryOptions};
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Discovery) {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();

        fs::create_dir_all(root.join("ok/src")).unwrap();
        fs::write(root.join("ok/package.json"), r#"{"name":"ok"}"#).unwrap();

        fs::create_dir_all(root.join("nosrc")).unwrap();
        fs::write(root.join("nosrc/package.json"), r#"{"name":"nosrc"}"#).unwrap();

        fs::create_dir_all(root.join("filesrc")).unwrap();
        fs::write(root.join("filesrc/package.json"), r#"{"name":"filesrc"}"#).unwrap();
        fs::write(root.join("filesrc/src"), "not a dir").unwrap();

        fs::create_dir_all(root.join("docs")).unwrap();

        let discovery = discover(root, &DiscoveryOptions::default()).unwrap();
        (tmp, discovery)
    }

    #[test]
    fn test_check_workspace() {
        let (_tmp, discovery) = setup();
        let report = check_workspace(&discovery);

        assert_eq!(report.checks.len(), 3);
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.failed_count(), 2);
        assert!(!report.all_passed());

        let by_name = |n: &str| report.checks.iter().find(|c| c.name == n).unwrap();
        assert!(by_name("ok").passed);
        assert_eq!(by_name("nosrc").message, "source directory missing");
        assert_eq!(by_name("filesrc").message, "source path is not a directory");
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn test_format_report() {
        let (_tmp, discovery) = setup();
        let report = check_workspace(&discovery);

        let output = format_report(&report, false);
        assert!(output.contains("[OK] ok"));
        assert!(output.contains("[!!] nosrc"));
        assert!(output.contains("Summary: 1 passed, 2 failed"));
        assert!(!output.contains("docs"));

        let verbose = format_report(&report, true);
        assert!(verbose.contains("[--] docs (no manifest)"));
    }

    #[test]
    fn test_empty_report_passes() {
        let tmp = TempDir::new().unwrap();
        let discovery = discover(tmp.path(), &DiscoveryOptions::default()).unwrap();
        let report = check_workspace(&discovery);
        assert!(report.all_passed());
        assert!(format_report(&report, false).contains("0 passed, 0 failed"));
    }
}
