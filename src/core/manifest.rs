//! Package manifest parsing.
//!
//! A workspace package declares its import specifier in a JSON manifest
//! (`package.json` by default). Only `name` is read; every other key is
//! ignored.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::workspace::DiscoveryError;

/// Default manifest file name looked up in each package directory.
pub const MANIFEST_NAME: &str = "package.json";

/// A parsed package manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackageManifest {
    /// Declared package name (the import specifier)
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
}

/// Accept any JSON value, keeping only strings.
///
/// A `name` of `null`, `42` or `{}` behaves like a missing name rather than a
/// malformed manifest.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

impl PackageManifest {
    /// Load a manifest from `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist. Any other I/O failure
    /// and any content that is not a JSON object is an error.
    pub fn load(path: &Path) -> Result<Option<Self>, DiscoveryError> {
        let content = match std::fs::read(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DiscoveryError::io(path, e)),
        };

        Self::parse(&content, path).map(Some)
    }

    /// Parse raw manifest bytes read from `path`.
    ///
    /// Invalid UTF-8 is malformed content, not an I/O failure.
    pub fn parse(content: &[u8], path: &Path) -> Result<Self, DiscoveryError> {
        let malformed = |source| DiscoveryError::MalformedManifest {
            path: PathBuf::from(path),
            source,
        };

        // Going through an object first rejects top-level arrays, which serde
        // would otherwise accept positionally for a struct.
        let object: serde_json::Map<String, serde_json::Value> =
            serde_json::from_slice(content).map_err(malformed)?;
        serde_json::from_value(serde_json::Value::Object(object)).map_err(malformed)
    }

    /// The declared name, if it is a non-blank string.
    pub fn name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(content: &str) -> Result<PackageManifest, DiscoveryError> {
        PackageManifest::parse(content.as_bytes(), Path::new("package.json"))
    }

    #[test]
    fn test_parse_name_ignores_other_keys() {
        let manifest = parse(r#"{"name": "@org/a", "version": "1.2.0", "private": true}"#).unwrap();
        assert_eq!(manifest.name(), Some("@org/a"));
    }

    #[test]
    fn test_missing_or_blank_name() {
        assert_eq!(parse("{}").unwrap().name(), None);
        assert_eq!(parse(r#"{"name": ""}"#).unwrap().name(), None);
        assert_eq!(parse(r#"{"name": "   "}"#).unwrap().name(), None);
        assert_eq!(parse(r#"{"name": null}"#).unwrap().name(), None);
        assert_eq!(parse(r#"{"name": 7}"#).unwrap().name(), None);
    }

    #[test]
    fn test_malformed_content() {
        assert!(matches!(
            parse(r#"{"name": "@org/a""#),
            Err(DiscoveryError::MalformedManifest { .. })
        ));
        assert!(matches!(
            parse(r#"["@org/a"]"#),
            Err(DiscoveryError::MalformedManifest { .. })
        ));
        assert!(matches!(parse(""), Err(DiscoveryError::MalformedManifest { .. })));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(MANIFEST_NAME);
        std::fs::write(&path, b"{\"name\": \"a\xff\"}").unwrap();

        assert!(matches!(
            PackageManifest::load(&path),
            Err(DiscoveryError::MalformedManifest { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let loaded = PackageManifest::load(&tmp.path().join(MANIFEST_NAME)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(MANIFEST_NAME);
        std::fs::write(&path, r#"{"name": "@org/b"}"#).unwrap();

        let loaded = PackageManifest::load(&path).unwrap().unwrap();
        assert_eq!(loaded.name(), Some("@org/b"));
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(MANIFEST_NAME);
        std::fs::create_dir(&path).unwrap();

        assert!(matches!(
            PackageManifest::load(&path),
            Err(DiscoveryError::Io { .. })
        ));
    }
}
