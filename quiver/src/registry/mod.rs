//! Static package catalog.
//!
//! The registry is a JSON document listing every package quiver knows how to
//! install: its name, the GitHub repository releases are published from, and
//! an artifact descriptor saying how to download and locate the binary.
//!
//! The catalog is loaded read-only once per invocation from a fixed relative
//! path (`./resources/registry.json`) and is immutable for the process
//! lifetime.

mod package;

pub use package::{Artifact, ArtifactKind, Package};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed relative path of the registry file.
pub const REGISTRY_PATH: &str = "./resources/registry.json";

/// The package catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    /// All known packages, keyed by their unique `name` field.
    pub pkgs: Vec<Package>,
}

impl Registry {
    /// Load the registry from the fixed relative path.
    pub fn load() -> Result<Self, RegistryError> {
        Self::load_from(Path::new(REGISTRY_PATH))
    }

    /// Load a registry from an explicit file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the JSON is malformed,
    /// or any artifact declares an empty binary path.
    pub fn load_from(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|source| RegistryError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let registry: Registry =
            serde_json::from_str(&contents).map_err(|source| RegistryError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        registry.validate()?;
        Ok(registry)
    }

    /// Find a package by name.
    pub fn find(&self, name: &str) -> Result<&Package, RegistryError> {
        self.pkgs
            .iter()
            .find(|pkg| pkg.name == name)
            .ok_or_else(|| RegistryError::PackageNotFound {
                name: name.to_string(),
            })
    }

    fn validate(&self) -> Result<(), RegistryError> {
        for pkg in &self.pkgs {
            if pkg.artifact.binary_path.is_empty() {
                return Err(RegistryError::EmptyBinaryPath {
                    name: pkg.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Errors that can occur loading or querying the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Failed to read the registry file.
    #[error("failed to read registry file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The registry file is not valid JSON.
    #[error("failed to parse registry JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An artifact declares an empty binary path.
    #[error("artifact for package {name} has an empty binary path")]
    EmptyBinaryPath { name: String },

    /// The requested package is not in the catalog.
    #[error("package {name} not found in registry")]
    PackageNotFound { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "pkgs": [
            {
                "name": "ripgrep",
                "repo": "https://github.com/BurntSushi/ripgrep",
                "artifact": {
                    "type": "tarball",
                    "url": "https://example.com/{version}/rg.tar.gz",
                    "binaryPath": "rg"
                }
            },
            {
                "name": "fd",
                "repo": "https://github.com/sharkdp/fd",
                "artifact": {
                    "type": "tarball",
                    "url": "https://example.com/v{version}/fd.tar.gz",
                    "binaryPath": "bin/fd",
                    "alias": "fdfind"
                }
            }
        ]
    }"#;

    fn write_registry(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_sample_registry() {
        let file = write_registry(SAMPLE);
        let registry = Registry::load_from(file.path()).unwrap();

        assert_eq!(registry.pkgs.len(), 2);
        assert_eq!(registry.pkgs[0].name, "ripgrep");
        assert_eq!(registry.pkgs[0].artifact.kind, ArtifactKind::Tarball);
        assert_eq!(registry.pkgs[1].artifact.alias.as_deref(), Some("fdfind"));
    }

    #[test]
    fn test_find_package() {
        let file = write_registry(SAMPLE);
        let registry = Registry::load_from(file.path()).unwrap();

        let pkg = registry.find("fd").unwrap();
        assert_eq!(pkg.repo, "https://github.com/sharkdp/fd");
    }

    #[test]
    fn test_find_missing_package() {
        let file = write_registry(SAMPLE);
        let registry = Registry::load_from(file.path()).unwrap();

        let err = registry.find("nope").unwrap_err();
        assert!(matches!(err, RegistryError::PackageNotFound { name } if name == "nope"));
    }

    #[test]
    fn test_load_malformed_json() {
        let file = write_registry("{ not json");
        let err = Registry::load_from(file.path()).unwrap_err();
        assert!(matches!(err, RegistryError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Registry::load_from(Path::new("/nonexistent/registry.json")).unwrap_err();
        assert!(matches!(err, RegistryError::Read { .. }));
    }

    #[test]
    fn test_empty_binary_path_rejected() {
        let file = write_registry(
            r#"{
                "pkgs": [
                    {
                        "name": "broken",
                        "repo": "https://github.com/x/broken",
                        "artifact": {
                            "type": "tarball",
                            "url": "https://example.com/{version}/b.tar.gz",
                            "binaryPath": ""
                        }
                    }
                ]
            }"#,
        );

        let err = Registry::load_from(file.path()).unwrap_err();
        assert!(matches!(err, RegistryError::EmptyBinaryPath { name } if name == "broken"));
    }
}
