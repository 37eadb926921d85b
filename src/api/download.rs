//! File transfer for course resources.
//!
//! Streams `file_url` into the download directory. The body is written to a
//! `.part` file first and renamed once complete, so a cancelled transfer never
//! leaves a truncated file under the final name.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use tokio::io::AsyncWriteExt;

use crate::core::download::{DownloadRequest, unique_path};

#[derive(Debug)]
pub enum DownloadError {
    /// Transport failure or non-2xx response.
    Http(String),
    /// Could not create or write the destination file.
    Io(io::Error),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::Http(msg) => write!(f, "download failed: {msg}"),
            DownloadError::Io(e) => write!(f, "could not save file: {e}"),
        }
    }
}

impl std::error::Error for DownloadError {}

impl From<io::Error> for DownloadError {
    fn from(e: io::Error) -> Self {
        DownloadError::Io(e)
    }
}

impl From<reqwest::Error> for DownloadError {
    fn from(e: reqwest::Error) -> Self {
        DownloadError::Http(e.to_string())
    }
}

/// Client for file transfers. No overall timeout (files can be large), only
/// a connect timeout.
pub fn download_client() -> Result<reqwest::Client, DownloadError> {
    Ok(reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()?)
}

/// Fetch `request.url` into `dir`, returning the final path.
pub async fn download(
    client: &reqwest::Client,
    request: &DownloadRequest,
    dir: &Path,
) -> Result<PathBuf, DownloadError> {
    info!("Downloading {} -> {}", request.url, request.filename);

    let response = client.get(&request.url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::Http(format!("HTTP {}", status.as_u16())));
    }

    tokio::fs::create_dir_all(dir).await?;
    let target = unique_path(dir, &request.filename, |p| p.exists());
    let partial = target.with_file_name(format!(
        "{}.part",
        target
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("download")
    ));

    let written = save(response, &partial, &target).await?;
    debug!("Wrote {} bytes to {}", written, target.display());
    Ok(target)
}

/// Stream the body to `partial`, then move it to `target`. Whatever fails,
/// the partial file does not outlive the call.
async fn save(
    response: reqwest::Response,
    partial: &Path,
    target: &Path,
) -> Result<usize, DownloadError> {
    let result = write_body(response, partial, target).await;
    if result.is_err() {
        let _ = tokio::fs::remove_file(partial).await;
    }
    result
}

async fn write_body(
    mut response: reqwest::Response,
    partial: &Path,
    target: &Path,
) -> Result<usize, DownloadError> {
    let mut file = tokio::fs::File::create(partial).await?;
    let mut written = 0usize;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len();
    }
    file.flush().await?;
    drop(file);

    tokio::fs::rename(partial, target).await?;
    Ok(written)
}
