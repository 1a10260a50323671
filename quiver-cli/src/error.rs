//! CLI error handling.

use std::fmt;

use quiver::config::ConfigError;
use quiver::registry::RegistryError;

/// Errors surfaced to the user with a non-zero exit code.
#[derive(Debug)]
pub enum CliError {
    /// Configuration bootstrap failed.
    Config(ConfigError),

    /// The registry could not be loaded.
    Registry(RegistryError),

    /// One or more packages in a batch command failed.
    PackagesFailed { names: Vec<String> },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "configuration error: {}", e),
            CliError::Registry(e) => write!(f, "registry error: {}", e),
            CliError::PackagesFailed { names } => {
                write!(f, "failed for package(s): {}", names.join(", "))
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Registry(e) => Some(e),
            CliError::PackagesFailed { .. } => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<RegistryError> for CliError {
    fn from(e: RegistryError) -> Self {
        CliError::Registry(e)
    }
}
