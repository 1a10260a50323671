//! Quiver - prebuilt binary tools from GitHub releases
//!
//! This library implements the package pipeline behind the `quiver` CLI:
//! resolving a package's latest published release, building a download URL
//! from a templated pattern, fetching the archive, extracting it, finding the
//! binary inside the extracted tree, and exposing it on the user's PATH via
//! a symlink.
//!
//! # Architecture
//!
//! ```text
//! Registry ──► ReleaseClient ──► template ──► PackageManager
//!                                                 │
//!                                  fetch ─► extract ─► locate ─► symlinks
//! ```
//!
//! The [`manager::PackageManager`] composes the pipeline stages into the
//! install/update/remove/list operations; everything below it is a plain
//! function or small client struct that can be exercised in isolation.

pub mod config;
pub mod manager;
pub mod registry;
pub mod release;
pub mod template;

pub use config::Config;
pub use manager::PackageManager;
pub use registry::Registry;
