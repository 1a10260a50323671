//! `quiver update` handler.

use quiver::manager::{ManagerResult, PackageManager};
use quiver::registry::Package;

/// Update one installed package to its latest release.
///
/// Updating a package that was never installed is a failure, not a skip;
/// the manager reports not-installed without mutating anything.
pub fn run(manager: &PackageManager, pkg: &Package) -> ManagerResult<()> {
    manager.update(pkg)
}
