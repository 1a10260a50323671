//! Error types for the package manager.

use std::io;
use std::path::PathBuf;

use crate::release::ReleaseError;
use crate::template::TemplateError;

/// Result type for manager operations.
pub type ManagerResult<T> = Result<T, ManagerError>;

/// Errors that can occur during package management operations.
#[derive(Debug)]
pub enum ManagerError {
    /// Failed to resolve the latest release.
    Release(ReleaseError),

    /// Failed to render the artifact URL template.
    Template(TemplateError),

    /// Failed to read a file.
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to write a file.
    WriteFailed { path: PathBuf, source: io::Error },

    /// Failed to create a directory.
    CreateDirFailed { path: PathBuf, source: io::Error },

    /// Failed to download the artifact archive.
    DownloadFailed { url: String, reason: String },

    /// The artifact URL returned 404; terminal, never retried.
    ArtifactNotFound { url: String },

    /// The archive filename carries no recognized suffix.
    UnsupportedFormat { path: PathBuf },

    /// The archive stream could not be read.
    ArchiveRead { path: PathBuf, source: io::Error },

    /// The archive contains an entry that is neither a directory nor a
    /// regular file.
    UnknownEntryType { entry: PathBuf, flag: u8 },

    /// The archive contains an entry whose path would resolve outside the
    /// extraction directory.
    EntryEscapesDest { entry: PathBuf },

    /// The declared binary was not found in the extracted tree.
    BinaryNotFound {
        binary_path: String,
        search_dir: PathBuf,
    },

    /// A filesystem entry already exists at the symlink path.
    LinkExists { path: PathBuf },

    /// No symlink exists at the expected install path.
    NotInstalled { link: PathBuf },

    /// Creating the symlink failed.
    SymlinkFailed {
        binary: PathBuf,
        link: PathBuf,
        source: io::Error,
    },
}

impl std::fmt::Display for ManagerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Release(e) => write!(f, "failed to resolve latest release: {}", e),
            Self::Template(e) => write!(f, "failed to build download URL: {}", e),
            Self::ReadFailed { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            Self::WriteFailed { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            Self::CreateDirFailed { path, source } => {
                write!(
                    f,
                    "failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::DownloadFailed { url, reason } => {
                write!(f, "failed to download {}: {}", url, reason)
            }
            Self::ArtifactNotFound { url } => {
                write!(f, "artifact not found (404): {}", url)
            }
            Self::UnsupportedFormat { path } => {
                write!(
                    f,
                    "unsupported archive format: {} (expected .tar, .tar.gz or .tar.xz)",
                    path.display()
                )
            }
            Self::ArchiveRead { path, source } => {
                write!(f, "failed to read archive {}: {}", path.display(), source)
            }
            Self::UnknownEntryType { entry, flag } => {
                write!(
                    f,
                    "unknown archive entry type (flag {:#04x}) for {}",
                    flag,
                    entry.display()
                )
            }
            Self::EntryEscapesDest { entry } => {
                write!(
                    f,
                    "archive entry {} escapes the extraction directory",
                    entry.display()
                )
            }
            Self::BinaryNotFound {
                binary_path,
                search_dir,
            } => {
                write!(
                    f,
                    "binary {} not found under {}",
                    binary_path,
                    search_dir.display()
                )
            }
            Self::LinkExists { path } => {
                write!(f, "a file already exists at {}", path.display())
            }
            Self::NotInstalled { link } => {
                write!(f, "nothing installed at {}", link.display())
            }
            Self::SymlinkFailed {
                binary,
                link,
                source,
            } => {
                write!(
                    f,
                    "failed to link {} -> {}: {}",
                    link.display(),
                    binary.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ManagerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Release(e) => Some(e),
            Self::Template(e) => Some(e),
            Self::ReadFailed { source, .. } => Some(source),
            Self::WriteFailed { source, .. } => Some(source),
            Self::CreateDirFailed { source, .. } => Some(source),
            Self::ArchiveRead { source, .. } => Some(source),
            Self::SymlinkFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ReleaseError> for ManagerError {
    fn from(e: ReleaseError) -> Self {
        ManagerError::Release(e)
    }
}

impl From<TemplateError> for ManagerError {
    fn from(e: TemplateError) -> Self {
        ManagerError::Template(e)
    }
}
