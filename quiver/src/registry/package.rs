//! Package and artifact descriptor types.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Identity of an installable tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Unique name within the catalog; the key users pass to the CLI.
    pub name: String,

    /// GitHub repository URL releases are discovered from.
    pub repo: String,

    /// How to obtain and locate this package's binary.
    pub artifact: Artifact,
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.repo)
    }
}

/// Archive format family of a published artifact.
///
/// Each variant knows how to post-process its download (see the prepare
/// stage on the manager); adding a format means adding a variant here and
/// a suffix mapping in the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// A tar-based archive, optionally gzip- or xz-compressed.
    Tarball,
}

/// Describes how to obtain and locate a package's binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Archive format family.
    #[serde(rename = "type")]
    pub kind: ArtifactKind,

    /// Download URL template containing a `{version}` placeholder.
    #[serde(rename = "url")]
    pub url_pattern: String,

    /// Relative path of the executable inside the unpacked tree.
    ///
    /// Must be non-empty; validated when the registry is loaded.
    #[serde(rename = "binaryPath")]
    pub binary_path: String,

    /// Optional name to expose in the install directory.
    ///
    /// Defaults to the basename of `binary_path` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Artifact {
    /// Name the installed symlink is created under.
    pub fn link_name(&self) -> &str {
        if let Some(alias) = &self.alias {
            return alias;
        }

        Path::new(&self.binary_path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.binary_path)
    }
}
