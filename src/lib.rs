//! wsalias - workspace package discovery for bundler alias configuration
//!
//! Scans a multi-package workspace, maps each declared package name to its
//! source directory, and renders the result as alias configuration for a
//! bundler dev server.

pub mod core;
pub mod ops;
pub mod util;

pub use self::core::{
    discover, AliasConfig, Discovery, DiscoveryError, DiscoveryOptions, PackageManifest,
};
pub use util::Config;
