//! `quiver remove` handler.

use tracing::info;

use quiver::manager::{ManagerResult, PackageManager};
use quiver::registry::Package;

/// Remove one package's symlink.
///
/// A package that is not installed is a logged skip, matching install's
/// skip-if-present behavior.
pub fn run(manager: &PackageManager, pkg: &Package) -> ManagerResult<()> {
    if !manager.is_installed(pkg) {
        info!("package {} is not installed", pkg.name);
        return Ok(());
    }

    manager.remove(pkg)
}
