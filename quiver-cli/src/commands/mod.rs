//! CLI subcommands.
//!
//! Every command bootstraps the configuration, loads the registry once,
//! and hands both to a handler. Batch commands (install/remove/update with
//! several names) process packages independently and sequentially: a
//! per-package failure is logged and the remaining names still run, but
//! the command exits non-zero if anything failed.

mod install;
mod list;
mod remove;
mod update;

use clap::Subcommand;
use tracing::error;

use quiver::manager::{ManagerResult, PackageManager};
use quiver::registry::{Package, Registry};
use quiver::Config;

use crate::error::CliError;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Install packages from the registry
    Install {
        /// Package names to install
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// Remove installed packages
    Remove {
        /// Package names to remove
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// Update installed packages to their latest release
    Update {
        /// Package names to update
        #[arg(required = true)]
        packages: Vec<String>,
    },

    /// List registry packages and their installation status
    List,
}

/// Run a subcommand to completion.
pub fn run(command: Command) -> Result<(), CliError> {
    let config = Config::bootstrap()?;
    let registry = Registry::load()?;
    let manager = PackageManager::new(config);

    match command {
        Command::Install { packages } => {
            for_each_package(&manager, &registry, &packages, install::run)
        }
        Command::Remove { packages } => {
            for_each_package(&manager, &registry, &packages, remove::run)
        }
        Command::Update { packages } => {
            for_each_package(&manager, &registry, &packages, update::run)
        }
        Command::List => {
            list::run(&manager, &registry);
            Ok(())
        }
    }
}

/// Apply one operation per requested package name.
///
/// Unknown names and per-package failures are logged with their cause and
/// do not stop the remaining packages; they are reported together at the
/// end.
fn for_each_package(
    manager: &PackageManager,
    registry: &Registry,
    names: &[String],
    op: fn(&PackageManager, &Package) -> ManagerResult<()>,
) -> Result<(), CliError> {
    let mut failed = Vec::new();

    for name in names {
        let pkg = match registry.find(name) {
            Ok(pkg) => pkg,
            Err(e) => {
                error!("{}", e);
                failed.push(name.clone());
                continue;
            }
        };

        if let Err(e) = op(manager, pkg) {
            error!("package {} failed: {}", name, e);
            failed.push(name.clone());
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::PackagesFailed { names: failed })
    }
}
