//! Workspace discovery.
//!
//! A workspace is a directory whose immediate subdirectories are packages.
//! Each package declares its name in a manifest; discovery maps every
//! declared name to the package's source directory.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::manifest::{PackageManifest, MANIFEST_NAME};
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Default source directory inside each package.
pub const SOURCE_DIR: &str = "src";

/// Mapping from package name to absolute source directory, in discovery order.
pub type AliasMap = IndexMap<String, PathBuf>;

/// Fatal discovery failure. No partial result survives one of these.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to parse manifest: {}", path.display())]
    MalformedManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("package name `{name}` is declared by both {} and {}", first.display(), second.display())]
    DuplicatePackage {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl DiscoveryError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        DiscoveryError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            DiscoveryError::MalformedManifest { path, source } => {
                Diagnostic::error("package manifest is not a valid JSON object")
                    .with_location(path.clone())
                    .with_context(source.to_string())
                    .with_suggestion(suggestions::MALFORMED_MANIFEST)
            }
            DiscoveryError::Io { path, source } => {
                Diagnostic::error(format!("could not read {}", path.display()))
                    .with_context(source.to_string())
            }
            DiscoveryError::DuplicatePackage {
                name,
                first,
                second,
            } => Diagnostic::error(format!("duplicate package name `{}`", name))
                .with_context(format!("declared in {}", first.display()))
                .with_context(format!("declared in {}", second.display()))
                .with_suggestion(suggestions::DUPLICATE_NAME),
        }
    }
}

/// What to do when two packages declare the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The package processed last takes the alias.
    #[default]
    LastWins,
    /// Abort discovery.
    Error,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last-wins" => Ok(DuplicatePolicy::LastWins),
            "error" => Ok(DuplicatePolicy::Error),
            _ => Err(format!(
                "invalid duplicate policy '{}'; expected 'last-wins' or 'error'",
                s
            )),
        }
    }
}

/// Options controlling a discovery run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Manifest file name looked up in each package directory
    pub manifest: String,

    /// Source directory the alias points at, relative to the package
    pub source_dir: String,

    /// Duplicate name handling
    pub duplicates: DuplicatePolicy,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        DiscoveryOptions {
            manifest: MANIFEST_NAME.to_string(),
            source_dir: SOURCE_DIR.to_string(),
            duplicates: DuplicatePolicy::default(),
        }
    }
}

/// Why a package directory produced no alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The directory has no manifest file.
    MissingManifest,
    /// The manifest has no usable `name`.
    MissingName,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingManifest => write!(f, "no manifest"),
            SkipReason::MissingName => write!(f, "manifest has no name"),
        }
    }
}

/// A directory that was looked at but contributed nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPackage {
    pub dir: PathBuf,
    pub reason: SkipReason,
}

/// Result of scanning a workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    root: PathBuf,
    aliases: AliasMap,
    skipped: Vec<SkippedPackage>,
}

impl Discovery {
    /// Absolute path of the scanned directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Package name to source directory.
    pub fn aliases(&self) -> &AliasMap {
        &self.aliases
    }

    /// Package names in discovery order.
    pub fn package_names(&self) -> Vec<&str> {
        self.aliases.keys().map(String::as_str).collect()
    }

    /// Directories that were skipped, with the reason.
    pub fn skipped(&self) -> &[SkippedPackage] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Split into the alias map and the package name list.
    pub fn into_parts(self) -> (AliasMap, Vec<String>) {
        let names = self.aliases.keys().cloned().collect();
        (self.aliases, names)
    }
}

/// Scan the immediate subdirectories of `root` for packages.
///
/// Candidates are visited in lexicographic order of directory name. A
/// directory without a manifest, or whose manifest has no usable name, is
/// skipped. A manifest that cannot be parsed, or any filesystem error other
/// than a missing manifest, aborts the whole run.
pub fn discover(root: &Path, options: &DiscoveryOptions) -> Result<Discovery, DiscoveryError> {
    let root = root
        .canonicalize()
        .map_err(|e| DiscoveryError::io(root, e))?;

    let mut candidates = Vec::new();
    for entry in fs::read_dir(&root).map_err(|e| DiscoveryError::io(&root, e))? {
        let entry = entry.map_err(|e| DiscoveryError::io(&root, e))?;
        let path = entry.path();

        // Follows symlinks, so a linked package directory still counts
        if path.is_dir() {
            candidates.push((entry.file_name(), path));
        }
    }
    candidates.sort_by(|a, b| a.0.cmp(&b.0));

    let mut aliases = AliasMap::new();
    let mut owners: HashMap<String, PathBuf> = HashMap::new();
    let mut skipped = Vec::new();

    for (_, dir) in candidates {
        let manifest_path = dir.join(&options.manifest);

        let Some(manifest) = PackageManifest::load(&manifest_path)? else {
            tracing::debug!("skipping {}: no {}", dir.display(), options.manifest);
            skipped.push(SkippedPackage {
                dir,
                reason: SkipReason::MissingManifest,
            });
            continue;
        };

        let Some(name) = manifest.name() else {
            tracing::debug!("skipping {}: manifest has no name", dir.display());
            skipped.push(SkippedPackage {
                dir,
                reason: SkipReason::MissingName,
            });
            continue;
        };

        if let Some(previous) = owners.get(name) {
            match options.duplicates {
                DuplicatePolicy::Error => {
                    return Err(DiscoveryError::DuplicatePackage {
                        name: name.to_string(),
                        first: previous.clone(),
                        second: dir,
                    });
                }
                DuplicatePolicy::LastWins => {
                    tracing::warn!(
                        "package `{}` in {} overrides the one in {}",
                        name,
                        dir.display(),
                        previous.display()
                    );
                }
            }
        }

        let source = dir.join(&options.source_dir);
        tracing::debug!("found `{}` -> {}", name, source.display());

        // IndexMap keeps the first insertion position on overwrite
        aliases.insert(name.to_string(), source);
        owners.insert(name.to_string(), dir);
    }

    tracing::debug!(
        "discovered {} package(s) in {}",
        aliases.len(),
        root.display()
    );

    Ok(Discovery {
        root,
        aliases,
        skipped,
    })
}
