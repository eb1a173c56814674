//! Bundler alias configuration.
//!
//! Renders a [`Discovery`] into the shape a dev-server config expects:
//! import aliases pointing at live source, the same specifiers excluded from
//! dependency pre-bundling, and the workspace directory allowed for serving.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::workspace::Discovery;

/// Complete alias configuration for a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasConfig {
    pub resolve: ResolveSection,
    pub optimize_deps: OptimizeDepsSection,
    pub server: ServerSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveSection {
    /// Import specifier to source directory
    pub alias: IndexMap<String, PathBuf>,
    /// Keep symlinked workspace paths as-is
    pub preserve_symlinks: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizeDepsSection {
    /// Specifiers never pre-bundled, so source edits are picked up live
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerSection {
    pub fs: FsSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FsSection {
    /// Directories the dev server may serve files from
    pub allow: Vec<PathBuf>,
}

impl AliasConfig {
    /// Build the configuration from a discovery result.
    pub fn from_discovery(discovery: &Discovery) -> Self {
        AliasConfig {
            resolve: ResolveSection {
                alias: discovery.aliases().clone(),
                preserve_symlinks: true,
            },
            optimize_deps: OptimizeDepsSection {
                exclude: discovery
                    .package_names()
                    .into_iter()
                    .map(String::from)
                    .collect(),
            },
            server: ServerSection {
                fs: FsSection {
                    allow: vec![discovery.root().to_path_buf()],
                },
            },
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::workspace::{discover, DiscoveryOptions};
    use tempfile::TempDir;

    #[test]
    fn test_alias_config_shape() {
        let tmp = TempDir::new().unwrap();
        for (dir, name) in [("b", "@org/b"), ("a", "@org/a")] {
            let pkg = tmp.path().join(dir);
            std::fs::create_dir_all(pkg.join("src")).unwrap();
            std::fs::write(pkg.join("package.json"), format!(r#"{{"name":"{}"}}"#, name))
                .unwrap();
        }

        let discovery = discover(tmp.path(), &DiscoveryOptions::default()).unwrap();
        let config = AliasConfig::from_discovery(&discovery);

        let json: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        let alias = json["resolve"]["alias"].as_object().unwrap();
        let keys: Vec<_> = alias.keys().cloned().collect();

        assert_eq!(json["resolve"]["preserveSymlinks"], true);
        assert_eq!(json["optimizeDeps"]["exclude"], serde_json::json!(["@org/a", "@org/b"]));
        assert_eq!(
            json["server"]["fs"]["allow"][0].as_str().unwrap(),
            discovery.root().to_str().unwrap()
        );
        assert!(alias["@org/a"].as_str().unwrap().ends_with("src"));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_exclude_matches_aliases() {
        let tmp = TempDir::new().unwrap();
        let discovery = discover(tmp.path(), &DiscoveryOptions::default()).unwrap();
        let config = AliasConfig::from_discovery(&discovery);

        assert!(config.resolve.alias.is_empty());
        assert!(config.optimize_deps.exclude.is_empty());
        assert_eq!(config.server.fs.allow.len(), 1);
    }
}
