//! Symlink installation into the install directory.
//!
//! A package is "installed" when a symlink with its link name exists in the
//! install directory. Installation state is never persisted anywhere else;
//! it is always recomputed from the filesystem. The existence check does
//! not validate the link target, so a dangling symlink still reads as
//! installed.

use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

use crate::registry::Artifact;

use super::error::{ManagerError, ManagerResult};

/// Compute the symlink path for an artifact in the install directory.
///
/// Deterministic: `install_dir / (alias or basename of binary path)`.
pub fn link_path(artifact: &Artifact, install_dir: &Path) -> PathBuf {
    install_dir.join(artifact.link_name())
}

/// Whether a filesystem entry exists at the artifact's link path.
pub fn is_installed(artifact: &Artifact, install_dir: &Path) -> bool {
    link_path(artifact, install_dir).symlink_metadata().is_ok()
}

/// Create the install symlink pointing at `binary`.
///
/// # Errors
///
/// Fails with [`ManagerError::LinkExists`] if any entry is already present
/// at `link`; callers check [`is_installed`] first for skip-if-present
/// semantics.
pub fn create_link(binary: &Path, link: &Path) -> ManagerResult<()> {
    if link.symlink_metadata().is_ok() {
        return Err(ManagerError::LinkExists {
            path: link.to_path_buf(),
        });
    }

    symlink(binary, link).map_err(|source| ManagerError::SymlinkFailed {
        binary: binary.to_path_buf(),
        link: link.to_path_buf(),
        source,
    })
}

/// Remove the install symlink.
///
/// # Errors
///
/// Fails with [`ManagerError::NotInstalled`] if nothing exists at `link`.
pub fn remove_link(link: &Path) -> ManagerResult<()> {
    if link.symlink_metadata().is_err() {
        return Err(ManagerError::NotInstalled {
            link: link.to_path_buf(),
        });
    }

    fs::remove_file(link).map_err(|source| ManagerError::WriteFailed {
        path: link.to_path_buf(),
        source,
    })
}
