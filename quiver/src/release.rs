//! Latest-release resolution against the GitHub API.
//!
//! Given a package's repository URL, queries the `releases/latest` endpoint
//! and extracts a normalized version string from the release tag. Only
//! repositories hosted on github.com are supported; other hosts fail fast
//! rather than guessing an API shape.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

/// Repository URL prefix for the supported release host.
const GITHUB_PREFIX: &str = "https://github.com/";

/// Errors that can occur resolving a package's latest release.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// The repository is not hosted on github.com.
    #[error("unsupported repository host: {repo}")]
    UnsupportedHost { repo: String },

    /// The HTTP request failed outright.
    #[error("failed to query {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The release endpoint returned a non-success status.
    #[error("no latest release at {url} (HTTP {status})")]
    NotFound { url: String, status: u16 },

    /// The release response body was not the expected JSON shape.
    #[error("failed to decode release response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct ReleaseInfo {
    tag_name: String,
}

/// Client for the release host's "latest release" endpoint.
#[derive(Debug)]
pub struct ReleaseClient {
    client: reqwest::blocking::Client,
}

impl Default for ReleaseClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseClient {
    /// Create a release client.
    ///
    /// The GitHub API rejects requests without a User-Agent, so one is
    /// always set.
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("quiver/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Resolve the latest release version for a repository URL.
    ///
    /// Returns the first `\d+.\d+.\d+` match in the release tag, or the raw
    /// tag unchanged if the tag carries no numeric triple (so tags like
    /// `stable` still resolve to something usable).
    ///
    /// # Errors
    ///
    /// Fails if the host is unsupported, the request fails, the endpoint
    /// returns a non-success status, or the response is not valid JSON.
    pub fn latest_version(&self, repo: &str) -> Result<String, ReleaseError> {
        let (owner, name) = split_repo(repo)?;
        let url = format!("https://api.github.com/repos/{owner}/{name}/releases/latest");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| ReleaseError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReleaseError::NotFound {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|source| ReleaseError::Network {
            url: url.clone(),
            source,
        })?;

        let info: ReleaseInfo =
            serde_json::from_str(&body).map_err(|source| ReleaseError::Decode { url, source })?;

        Ok(extract_version(&info.tag_name))
    }
}

/// Split a GitHub repository URL into its owner and repo segments.
fn split_repo(repo: &str) -> Result<(&str, &str), ReleaseError> {
    let unsupported = || ReleaseError::UnsupportedHost {
        repo: repo.to_string(),
    };

    let rest = repo.strip_prefix(GITHUB_PREFIX).ok_or_else(unsupported)?;
    let mut segments = rest.trim_end_matches('/').split('/');

    match (segments.next(), segments.next()) {
        (Some(owner), Some(name)) if !owner.is_empty() && !name.is_empty() => Ok((owner, name)),
        _ => Err(unsupported()),
    }
}

/// Extract a normalized version string from a release tag.
///
/// Takes the first numeric `major.minor.patch` triple found in the tag.
/// A tag with no such triple is returned unmodified; this fallback is
/// deliberate so non-semver tags still produce a usable substitution value.
pub fn extract_version(tag: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN
        .get_or_init(|| Regex::new(r"\d+\.\d+\.\d+").expect("version pattern is valid"));

    match pattern.find(tag) {
        Some(found) => found.as_str().to_string(),
        None => tag.to_string(),
    }
}
