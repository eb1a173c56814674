//! Workspace discovery driven by configuration.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::workspace::{discover, Discovery};
use crate::util::config::Config;
use crate::util::diagnostic::suggestions;

/// Options for [`discover_workspace`].
#[derive(Debug, Clone, Default)]
pub struct DiscoverOptions {
    /// Workspace root; `wsalias.toml` is looked up here
    pub root: PathBuf,

    /// Settings that override the config file (typically from CLI flags)
    pub overrides: Config,
}

/// Load the workspace config, then scan its packages directory.
pub fn discover_workspace(options: &DiscoverOptions) -> Result<Discovery> {
    let mut config = Config::load_from_root(&options.root)?;
    config.merge(options.overrides.clone());

    let packages_dir = config.packages_dir(&options.root);
    if !packages_dir.is_dir() {
        anyhow::bail!(
            "packages directory not found: {}\n{}",
            packages_dir.display(),
            suggestions::NO_PACKAGES_DIR
        );
    }

    let discovery = discover(&packages_dir, &config.discovery_options())?;

    tracing::info!(
        "discovered {} package(s) in {} ({} skipped)",
        discovery.len(),
        packages_dir.display(),
        discovery.skipped().len()
    );

    Ok(discovery)
}
