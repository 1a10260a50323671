//! Package manager: the install/update/remove/list pipeline.
//!
//! The [`PackageManager`] composes the pipeline stages per package:
//!
//! ```text
//! resolve version ─► render URL ─► fetch ─► prepare ─► extract ─► locate ─► link
//! ```
//!
//! Processing is synchronous and sequential; one package is fully handled
//! before the next begins, and no stage is retried. Each package gets a
//! workspace directory under the configured package dir holding its
//! downloaded archive and extracted tree; `remove` deliberately leaves that
//! workspace in place so a later install can reuse it.

mod error;
mod extract;
mod fetch;
mod locate;
pub mod symlinks;

pub use error::{ManagerError, ManagerResult};
pub use extract::{extract_archive, ArchiveFormat};
pub use fetch::{FetchedArchive, HttpFetcher};
pub use locate::{archive_base_name, locate_binary};

use tracing::info;

use crate::config::Config;
use crate::registry::{Artifact, ArtifactKind, Package, Registry};
use crate::release::ReleaseClient;
use crate::template;

/// Installed/not-installed report for one catalog package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageStatus<'a> {
    pub package: &'a Package,
    pub installed: bool,
}

/// Drives the per-package lifecycle.
#[derive(Debug)]
pub struct PackageManager {
    config: Config,
    releases: ReleaseClient,
    fetcher: HttpFetcher,
}

impl PackageManager {
    /// Create a manager over the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            releases: ReleaseClient::new(),
            fetcher: HttpFetcher::new(),
        }
    }

    /// The configuration this manager operates on.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether a package's symlink currently exists in the install dir.
    pub fn is_installed(&self, pkg: &Package) -> bool {
        symlinks::is_installed(&pkg.artifact, &self.config.install_dir)
    }

    /// Install a package at its latest published version.
    ///
    /// A package that is already installed is skipped with a log message,
    /// not an error. Otherwise the full pipeline runs; the first failing
    /// stage aborts the install and no symlink is created.
    pub fn install(&self, pkg: &Package) -> ManagerResult<()> {
        if self.is_installed(pkg) {
            info!("package {} is already installed", pkg.name);
            return Ok(());
        }

        let version = self.releases.latest_version(&pkg.repo)?;
        let url = template::render(&pkg.artifact.url_pattern, &version)?;

        info!("downloading {} v{}", pkg.name, version);
        let workspace = self.config.package_workspace(&pkg.name);
        let fetched = self.fetcher.fetch(&url, &workspace)?;

        self.prepare(&pkg.artifact, &fetched)?;
        self.install_archive(&pkg.artifact, &fetched)
    }

    /// Format-specific post-processing between fetch and extract.
    ///
    /// Nothing to do for tarballs; kept as the seam where a new artifact
    /// kind would hook in (e.g. decompressing a standalone binary).
    fn prepare(&self, artifact: &Artifact, _fetched: &FetchedArchive) -> ManagerResult<()> {
        match artifact.kind {
            ArtifactKind::Tarball => Ok(()),
        }
    }

    /// Extract a fetched archive, locate the binary and create the symlink.
    fn install_archive(&self, artifact: &Artifact, fetched: &FetchedArchive) -> ManagerResult<()> {
        // Workspace dir holding the archive is also the extraction target.
        let workspace = fetched
            .path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default();

        extract_archive(&fetched.path, &workspace)?;

        let base = archive_base_name(&fetched.path)?;
        let binary = locate_binary(&workspace, &base, &artifact.binary_path)?;

        let link = symlinks::link_path(artifact, &self.config.install_dir);
        symlinks::create_link(&binary, &link)?;

        info!("linked {} -> {}", link.display(), binary.display());
        Ok(())
    }

    /// Remove a package's symlink.
    ///
    /// The downloaded archive and extracted tree in the package workspace
    /// are kept for reuse by a future install.
    pub fn remove(&self, pkg: &Package) -> ManagerResult<()> {
        let link = symlinks::link_path(&pkg.artifact, &self.config.install_dir);
        symlinks::remove_link(&link)?;
        info!("removed {}", link.display());
        Ok(())
    }

    /// Update an installed package to its freshly resolved latest version.
    ///
    /// Implemented as remove-then-install; there is no in-place patch. A
    /// failed install after a successful remove leaves the package absent
    /// until re-installed.
    ///
    /// # Errors
    ///
    /// Fails with [`ManagerError::NotInstalled`] if the package is not
    /// currently installed; nothing is mutated in that case.
    pub fn update(&self, pkg: &Package) -> ManagerResult<()> {
        if !self.is_installed(pkg) {
            return Err(ManagerError::NotInstalled {
                link: symlinks::link_path(&pkg.artifact, &self.config.install_dir),
            });
        }

        self.remove(pkg)?;
        self.install(pkg)
    }

    /// Report the installation status of every catalog package.
    ///
    /// Reads only the filesystem; no state file exists.
    pub fn list<'a>(&self, registry: &'a Registry) -> Vec<PackageStatus<'a>> {
        registry
            .pkgs
            .iter()
            .map(|package| PackageStatus {
                package,
                installed: self.is_installed(package),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn test_manager(temp: &TempDir) -> PackageManager {
        let config = Config::under(
            temp.path().join("home"),
            temp.path().join("bin"),
        )
        .unwrap();
        PackageManager::new(config)
    }

    fn test_package(name: &str) -> Package {
        Package {
            name: name.to_string(),
            repo: format!("https://github.com/example/{name}"),
            artifact: Artifact {
                kind: ArtifactKind::Tarball,
                url_pattern: format!("https://example.com/{{version}}/{name}.tar.gz"),
                binary_path: format!("bin/{name}"),
                alias: None,
            },
        }
    }

    #[test]
    fn test_update_never_installed_fails_without_mutation() {
        let temp = TempDir::new().unwrap();
        let manager = test_manager(&temp);
        let pkg = test_package("tool");

        let err = manager.update(&pkg).unwrap_err();
        assert!(matches!(err, ManagerError::NotInstalled { .. }));

        // No workspace created, no link created.
        assert!(!manager.config().package_workspace("tool").exists());
        assert!(fs::read_dir(&manager.config().install_dir)
            .unwrap()
            .next()
            .is_none());
    }

    #[test]
    fn test_remove_not_installed_fails() {
        let temp = TempDir::new().unwrap();
        let manager = test_manager(&temp);

        let err = manager.remove(&test_package("tool")).unwrap_err();
        assert!(matches!(err, ManagerError::NotInstalled { .. }));
    }

    #[test]
    fn test_remove_keeps_package_workspace() {
        let temp = TempDir::new().unwrap();
        let manager = test_manager(&temp);
        let pkg = test_package("tool");

        // Simulate a prior install: workspace with a binary, plus the link.
        let workspace = manager.config().package_workspace("tool");
        fs::create_dir_all(workspace.join("bin")).unwrap();
        fs::write(workspace.join("bin/tool"), b"x").unwrap();
        let link = symlinks::link_path(&pkg.artifact, &manager.config().install_dir);
        symlinks::create_link(&workspace.join("bin/tool"), &link).unwrap();

        manager.remove(&pkg).unwrap();

        assert!(link.symlink_metadata().is_err());
        assert!(workspace.join("bin/tool").exists());
    }

    #[test]
    fn test_list_reflects_filesystem() {
        let temp = TempDir::new().unwrap();
        let manager = test_manager(&temp);
        let registry = Registry {
            pkgs: vec![test_package("alpha"), test_package("beta")],
        };

        // Install "beta" by hand.
        let beta = &registry.pkgs[1];
        let target = temp.path().join("beta-binary");
        fs::write(&target, b"x").unwrap();
        symlinks::create_link(
            &target,
            &symlinks::link_path(&beta.artifact, &manager.config().install_dir),
        )
        .unwrap();

        let statuses = manager.list(&registry);
        assert_eq!(statuses.len(), 2);
        assert!(!statuses[0].installed);
        assert!(statuses[1].installed);
        assert_eq!(statuses[0].package.name, "alpha");
    }

    #[test]
    fn test_install_skips_when_already_installed() {
        let temp = TempDir::new().unwrap();
        let manager = test_manager(&temp);
        let pkg = test_package("tool");

        // Pre-create the link; install must return Ok without touching the
        // network (the repo URL would not resolve anyway).
        let target = temp.path().join("tool-binary");
        fs::write(&target, b"x").unwrap();
        symlinks::create_link(
            &target,
            &symlinks::link_path(&pkg.artifact, &manager.config().install_dir),
        )
        .unwrap();

        manager.install(&pkg).unwrap();
        assert!(!manager.config().package_workspace("tool").exists());
    }
}
