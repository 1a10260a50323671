//! Binary location within an extracted archive tree.
//!
//! Release archives come in two layouts: flat, where the declared binary
//! path sits directly under the extraction directory, and nested, where the
//! archive wraps its contents in a top-level directory named after the
//! archive file itself (e.g. `ripgrep-14.0.3-x86_64/rg`).

use std::path::{Path, PathBuf};

use super::error::{ManagerError, ManagerResult};

/// The archive's base name: its filename up to the first `.tar` occurrence.
///
/// `ripgrep-14.0.3-x86_64.tar.gz` → `ripgrep-14.0.3-x86_64`. This is the
/// directory name nested-layout archives wrap their contents in.
pub fn archive_base_name(archive: &Path) -> ManagerResult<String> {
    let unsupported = || ManagerError::UnsupportedFormat {
        path: archive.to_path_buf(),
    };

    let filename = archive
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(unsupported)?;

    let end = filename.find(".tar").ok_or_else(unsupported)?;
    Ok(filename[..end].to_string())
}

/// Find the declared binary inside the extracted tree.
///
/// Tries the flat layout first, then the nested layout; the flat path wins
/// when both exist.
///
/// # Errors
///
/// Returns [`ManagerError::BinaryNotFound`] when neither layout holds the
/// binary — a terminal error for the install, not a partial success.
pub fn locate_binary(
    dest_dir: &Path,
    archive_base: &str,
    binary_path: &str,
) -> ManagerResult<PathBuf> {
    let flat = dest_dir.join(binary_path);
    if flat.exists() {
        return Ok(flat);
    }

    let nested = dest_dir.join(archive_base).join(binary_path);
    if nested.exists() {
        return Ok(nested);
    }

    Err(ManagerError::BinaryNotFound {
        binary_path: binary_path.to_string(),
        search_dir: dest_dir.to_path_buf(),
    })
}
