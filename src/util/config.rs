//! Configuration file support for wsalias.
//!
//! A workspace may carry a `wsalias.toml` at its root:
//!
//! ```toml
//! [discovery]
//! packages-dir = "packages"
//! manifest = "package.json"
//! source-dir = "src"
//! duplicates = "last-wins"
//! ```
//!
//! Command-line flags take precedence over the file, which takes precedence
//! over built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::workspace::{DiscoveryOptions, DuplicatePolicy};
use crate::core::{MANIFEST_NAME, SOURCE_DIR};

/// Project configuration file name.
pub const CONFIG_NAME: &str = "wsalias.toml";

/// Default directory holding the workspace packages.
pub const PACKAGES_DIR: &str = "packages";

/// wsalias configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Discovery settings
    pub discovery: DiscoveryConfig,
}

/// The `[discovery]` section. Unset fields fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct DiscoveryConfig {
    /// Packages directory, relative to the workspace root
    pub packages_dir: Option<PathBuf>,

    /// Manifest file name inside each package
    pub manifest: Option<String>,

    /// Source directory inside each package
    pub source_dir: Option<String>,

    /// Duplicate package name handling
    pub duplicates: Option<DuplicatePolicy>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load `wsalias.toml` from `root`, or defaults if there is none.
    ///
    /// A config file that exists but does not parse is an error.
    pub fn load_from_root(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_NAME);
        if path.exists() {
            tracing::debug!("loading config from {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        let ours = &mut self.discovery;
        let theirs = other.discovery;

        if theirs.packages_dir.is_some() {
            ours.packages_dir = theirs.packages_dir;
        }
        if theirs.manifest.is_some() {
            ours.manifest = theirs.manifest;
        }
        if theirs.source_dir.is_some() {
            ours.source_dir = theirs.source_dir;
        }
        if theirs.duplicates.is_some() {
            ours.duplicates = theirs.duplicates;
        }
    }

    /// The packages directory for a workspace rooted at `root`.
    pub fn packages_dir(&self, root: &Path) -> PathBuf {
        root.join(
            self.discovery
                .packages_dir
                .as_deref()
                .unwrap_or(Path::new(PACKAGES_DIR)),
        )
    }

    /// Resolve the effective discovery options.
    pub fn discovery_options(&self) -> DiscoveryOptions {
        let d = &self.discovery;
        DiscoveryOptions {
            manifest: d.manifest.clone().unwrap_or_else(|| MANIFEST_NAME.to_string()),
            source_dir: d.source_dir.clone().unwrap_or_else(|| SOURCE_DIR.to_string()),
            duplicates: d.duplicates.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.discovery_options(), DiscoveryOptions::default());
        assert_eq!(
            config.packages_dir(Path::new("/ws")),
            Path::new("/ws").join("packages")
        );
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_NAME),
            r#"
[discovery]
packages-dir = "libs"
source-dir = "lib"
duplicates = "error"
"#,
        )
        .unwrap();

        let config = Config::load_from_root(tmp.path()).unwrap();
        let options = config.discovery_options();
        assert_eq!(config.packages_dir(tmp.path()), tmp.path().join("libs"));
        assert_eq!(options.manifest, "package.json");
        assert_eq!(options.source_dir, "lib");
        assert_eq!(options.duplicates, DuplicatePolicy::Error);
    }

    #[test]
    fn test_config_missing_file_is_default() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(Config::load_from_root(tmp.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_config_rejects_bad_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_NAME), "[discovery]\nsrc = \"lib\"\n").unwrap();
        let err = Config::load_from_root(tmp.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse config"));

        std::fs::write(tmp.path().join(CONFIG_NAME), "[discovery]\nduplicates = \"first\"\n")
            .unwrap();
        assert!(Config::load_from_root(tmp.path()).is_err());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.discovery.packages_dir = Some(PathBuf::from("libs"));
        base.discovery.manifest = Some("manifest.json".to_string());

        let mut overrides = Config::default();
        overrides.discovery.manifest = Some("package.json".to_string());
        overrides.discovery.duplicates = Some(DuplicatePolicy::Error);

        base.merge(overrides);
        assert_eq!(base.discovery.packages_dir, Some(PathBuf::from("libs")));
        assert_eq!(base.discovery.manifest.as_deref(), Some("package.json"));
        assert_eq!(base.discovery.duplicates, Some(DuplicatePolicy::Error));
        assert_eq!(base.discovery.source_dir, None);
    }
}
