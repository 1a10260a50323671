//! `quiver install` handler.

use quiver::manager::{ManagerResult, PackageManager};
use quiver::registry::Package;

/// Install one package; already-installed packages are a logged no-op
/// inside the manager.
pub fn run(manager: &PackageManager, pkg: &Package) -> ManagerResult<()> {
    manager.install(pkg)
}
