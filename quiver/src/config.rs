//! Filesystem configuration for quiver.
//!
//! All package data lives under a single home directory (`~/.quiver` by
//! default), with one workspace per package for downloaded archives and
//! their extracted trees. Installed binaries are exposed as symlinks in an
//! install directory that is expected to already be on the user's PATH.
//!
//! The configuration is an explicit value constructed once during process
//! bootstrap and passed by reference into the components that need paths.
//! There is no global singleton and no re-initialization to guard against.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the quiver home directory under the user's home.
pub const HOME_DIR_NAME: &str = ".quiver";

/// Filesystem paths used by the package pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root directory for all quiver data (e.g. `~/.quiver`).
    pub home_dir: PathBuf,

    /// Directory holding one workspace subdirectory per package name.
    pub package_dir: PathBuf,

    /// Directory where binary symlinks are created.
    ///
    /// Expected to already be on the user's PATH; quiver does not edit
    /// shell profiles.
    pub install_dir: PathBuf,
}

impl Config {
    /// Build the default configuration under the user's home directory.
    ///
    /// Creates `~/.quiver`, `~/.quiver/packages` and `~/.local/bin` if they
    /// do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined or a
    /// directory cannot be created.
    pub fn bootstrap() -> Result<Self, ConfigError> {
        let user_home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Self::under(
            user_home.join(HOME_DIR_NAME),
            user_home.join(".local").join("bin"),
        )
    }

    /// Build a configuration rooted at an explicit home directory.
    ///
    /// The package directory is always `<home_dir>/packages`. All three
    /// directories are created idempotently.
    pub fn under(home_dir: PathBuf, install_dir: PathBuf) -> Result<Self, ConfigError> {
        let package_dir = home_dir.join("packages");

        for dir in [&home_dir, &package_dir, &install_dir] {
            ensure_dir(dir)?;
        }

        Ok(Self {
            home_dir,
            package_dir,
            install_dir,
        })
    }

    /// Workspace directory for a single package.
    ///
    /// Holds the downloaded archive and its extracted tree. The directory
    /// is not created here; the fetch stage creates it on first use.
    pub fn package_workspace(&self, name: &str) -> PathBuf {
        self.package_dir.join(name)
    }
}

fn ensure_dir(path: &Path) -> Result<(), ConfigError> {
    fs::create_dir_all(path).map_err(|source| ConfigError::CreateDirFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Errors that can occur during configuration bootstrap.
#[derive(Debug)]
pub enum ConfigError {
    /// The user's home directory could not be determined.
    HomeDirNotFound,

    /// A configured directory could not be created.
    CreateDirFailed { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::HomeDirNotFound => {
                write!(f, "could not determine the user's home directory")
            }
            ConfigError::CreateDirFailed { path, source } => {
                write!(
                    f,
                    "failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::HomeDirNotFound => None,
            ConfigError::CreateDirFailed { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_under_creates_directories() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        let install = temp.path().join("bin");

        let config = Config::under(home.clone(), install.clone()).unwrap();

        assert!(home.is_dir());
        assert!(home.join("packages").is_dir());
        assert!(install.is_dir());
        assert_eq!(config.package_dir, home.join("packages"));
    }

    #[test]
    fn test_under_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        let install = temp.path().join("bin");

        let first = Config::under(home.clone(), install.clone()).unwrap();
        let second = Config::under(home, install).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_package_workspace() {
        let temp = TempDir::new().unwrap();
        let config = Config::under(
            temp.path().join("home"),
            temp.path().join("bin"),
        )
        .unwrap();

        assert_eq!(
            config.package_workspace("ripgrep"),
            config.package_dir.join("ripgrep")
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::HomeDirNotFound;
        assert!(err.to_string().contains("home directory"));
    }
}
