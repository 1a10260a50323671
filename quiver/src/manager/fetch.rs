//! HTTP archive download.
//!
//! Downloads a resolved artifact URL into a package's workspace directory,
//! streaming the response body straight to disk. Release-hosting CDNs
//! answer the initial request with a redirect to a signed storage URL, so
//! redirects are always followed and their targets taken as-is.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use reqwest::redirect;
use reqwest::StatusCode;
use tracing::debug;

use super::error::{ManagerError, ManagerResult};

/// A successfully downloaded archive, threaded through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedArchive {
    /// Local path of the downloaded archive file.
    pub path: PathBuf,
}

/// HTTP-based archive fetcher.
#[derive(Debug)]
pub struct HttpFetcher {
    client: Client,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Create a new fetcher.
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(concat!("quiver/", env!("CARGO_PKG_VERSION")))
            .redirect(redirect::Policy::limited(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Download `url` into `dest_dir`, naming the file after the URL's
    /// final path segment.
    ///
    /// The destination directory is created if needed. The body is streamed
    /// to the file; nothing is buffered in memory. On failure a truncated
    /// file may be left behind for the caller to overwrite on retry.
    ///
    /// # Errors
    ///
    /// A 404 response is reported as [`ManagerError::ArtifactNotFound`] and
    /// must not be retried; other failures map to `DownloadFailed` or the
    /// filesystem error variants.
    pub fn fetch(&self, url: &str, dest_dir: &Path) -> ManagerResult<FetchedArchive> {
        fs::create_dir_all(dest_dir).map_err(|source| ManagerError::CreateDirFailed {
            path: dest_dir.to_path_buf(),
            source,
        })?;

        let filename = filename_from_url(url).ok_or_else(|| ManagerError::DownloadFailed {
            url: url.to_string(),
            reason: "URL has no filename segment".to_string(),
        })?;

        let mut response =
            self.client
                .get(url)
                .send()
                .map_err(|e| ManagerError::DownloadFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ManagerError::ArtifactNotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ManagerError::DownloadFailed {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        let dest = dest_dir.join(filename);
        let file = File::create(&dest).map_err(|source| ManagerError::WriteFailed {
            path: dest.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        let size =
            io::copy(&mut response, &mut writer).map_err(|source| ManagerError::WriteFailed {
                path: dest.clone(),
                source,
            })?;
        writer.flush().map_err(|source| ManagerError::WriteFailed {
            path: dest.clone(),
            source,
        })?;

        debug!("downloaded {} ({} bytes)", dest.display(), size);
        Ok(FetchedArchive { path: dest })
    }
}

/// The final path segment of a URL, with any query or fragment stripped.
///
/// Returns `None` for URLs with no path segments at all (a bare host is
/// not a usable filename).
fn filename_from_url(url: &str) -> Option<&str> {
    let mut path = url;
    for separator in ['#', '?'] {
        if let Some((before, _)) = path.split_once(separator) {
            path = before;
        }
    }

    // Skip the scheme and authority; everything after the first '/' past
    // the host is the path.
    let after_scheme = path.split_once("://").map_or(path, |(_, rest)| rest);
    let (_, segments) = after_scheme.split_once('/')?;

    let segment = segments.rsplit('/').next()?;
    if segment.is_empty() {
        return None;
    }
    Some(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_url() {
        assert_eq!(
            filename_from_url("https://example.com/v1.2.3/tool.tar.gz"),
            Some("tool.tar.gz")
        );
    }

    #[test]
    fn test_filename_from_url_strips_query() {
        assert_eq!(
            filename_from_url("https://cdn.example.com/tool.tar.gz?token=abc"),
            Some("tool.tar.gz")
        );
    }

    #[test]
    fn test_filename_from_url_strips_fragment() {
        assert_eq!(
            filename_from_url("https://example.com/tool.tar.xz#section"),
            Some("tool.tar.xz")
        );
    }

    #[test]
    fn test_filename_from_url_rejects_trailing_slash() {
        assert_eq!(filename_from_url("https://example.com/downloads/"), None);
    }

    #[test]
    fn test_filename_from_url_rejects_bare_host() {
        assert_eq!(filename_from_url("https://example.com"), None);
        assert_eq!(filename_from_url("https://example.com:8080"), None);
    }

    #[test]
    fn test_filename_from_url_with_port() {
        assert_eq!(
            filename_from_url("https://example.com:8080/tool.tar.gz"),
            Some("tool.tar.gz")
        );
    }
}
