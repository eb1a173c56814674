//! Core data structures for wsalias.
//!
//! - Package manifests
//! - Workspace discovery (the alias map and package name list)
//! - Bundler alias configuration

pub mod alias;
pub mod manifest;
pub mod workspace;

pub use alias::AliasConfig;
pub use manifest::{PackageManifest, MANIFEST_NAME};
pub use workspace::{
    discover, AliasMap, Discovery, DiscoveryError, DiscoveryOptions, DuplicatePolicy, SkipReason,
    SkippedPackage, SOURCE_DIR,
};
