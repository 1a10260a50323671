//! `quiver list` handler.

use quiver::manager::PackageManager;
use quiver::registry::Registry;

/// Print every catalog package with an installation marker.
pub fn run(manager: &PackageManager, registry: &Registry) {
    for status in manager.list(registry) {
        let marker = if status.installed { "*" } else { " " };
        println!("{} {}", marker, status.package.name);
    }
}
