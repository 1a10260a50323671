//! Archive extraction.
//!
//! Unpacks a downloaded tar archive into its package workspace, preserving
//! each regular file's declared mode and recreating the directory
//! hierarchy. The compression format is chosen purely by filename suffix;
//! each [`ArchiveFormat`] variant opens its own decompressing reader, so
//! supporting a new compression means adding a variant, not editing the
//! extraction loop.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read};
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Component, Path};

use flate2::read::GzDecoder;
use tar::EntryType;
use tracing::debug;
use xz2::read::XzDecoder;

use super::error::{ManagerError, ManagerResult};

/// Supported archive compression formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// Uncompressed `.tar`.
    Tar,
    /// Gzip-compressed `.tar.gz`.
    TarGz,
    /// Xz-compressed `.tar.xz`.
    TarXz,
}

impl ArchiveFormat {
    /// Detect the format from a filename suffix.
    ///
    /// Returns `None` for anything that is not a recognized tar variant.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;

        if name.ends_with(".tar.gz") {
            Some(Self::TarGz)
        } else if name.ends_with(".tar.xz") {
            Some(Self::TarXz)
        } else if name.ends_with(".tar") {
            Some(Self::Tar)
        } else {
            None
        }
    }

    /// Open a decompressing reader over the archive file.
    fn open_reader(self, file: File) -> Box<dyn Read> {
        let reader = BufReader::new(file);
        match self {
            Self::Tar => Box::new(reader),
            Self::TarGz => Box::new(GzDecoder::new(reader)),
            Self::TarXz => Box::new(XzDecoder::new(reader)),
        }
    }
}

/// Extract an archive's full contents into `dest_dir`.
///
/// Directory entries create all intermediate directories with the system
/// default mode; regular files are created/truncated with the
/// archive-declared permission bits and their bytes copied verbatim. Any
/// other entry type is a hard failure, since silently skipping (say) a
/// symlink would leave an unexpectedly absent file. Entry paths with `..`
/// or absolute components are rejected before anything is written.
///
/// Extraction stops at the first error; a failed extraction is treated by
/// callers as needing a full re-download, not resumed.
pub fn extract_archive(archive: &Path, dest_dir: &Path) -> ManagerResult<()> {
    let format =
        ArchiveFormat::from_path(archive).ok_or_else(|| ManagerError::UnsupportedFormat {
            path: archive.to_path_buf(),
        })?;

    let file = File::open(archive).map_err(|source| ManagerError::ReadFailed {
        path: archive.to_path_buf(),
        source,
    })?;

    let archive_read = |source: io::Error| ManagerError::ArchiveRead {
        path: archive.to_path_buf(),
        source,
    };

    let mut tarball = tar::Archive::new(format.open_reader(file));
    for entry in tarball.entries().map_err(archive_read)? {
        let mut entry = entry.map_err(archive_read)?;
        let name = entry.path().map_err(archive_read)?.into_owned();

        // Entry paths must stay relative to the destination; a `..` or
        // absolute component would land the write outside it.
        if name
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(ManagerError::EntryEscapesDest { entry: name });
        }

        let target = dest_dir.join(&name);

        match entry.header().entry_type() {
            EntryType::Directory => {
                fs::create_dir_all(&target).map_err(|source| ManagerError::CreateDirFailed {
                    path: target.clone(),
                    source,
                })?;
            }
            EntryType::Regular => {
                let mode = entry.header().mode().map_err(archive_read)?;
                write_entry(&mut entry, &target, mode)?;
            }
            other => {
                return Err(ManagerError::UnknownEntryType {
                    entry: name,
                    flag: other.as_byte(),
                });
            }
        }
    }

    debug!(
        "extracted {} into {}",
        archive.display(),
        dest_dir.display()
    );
    Ok(())
}

/// Write one regular-file entry with the archive-declared mode.
fn write_entry(entry: &mut impl Read, target: &Path, mode: u32) -> ManagerResult<()> {
    let write_failed = |source: io::Error| ManagerError::WriteFailed {
        path: target.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(target)
        .map_err(write_failed)?;

    io::copy(entry, &mut file).map_err(write_failed)?;

    // The mode on open only applies to newly created files; re-extraction
    // over an existing tree must still end up with the declared bits.
    fs::set_permissions(target, fs::Permissions::from_mode(mode)).map_err(write_failed)?;

    Ok(())
}
