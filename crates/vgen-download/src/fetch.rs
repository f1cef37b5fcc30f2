//! Streaming video fetch.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{DownloadError, DownloadResult};

/// Download a finished video to `dest_dir/filename`.
///
/// Streams the body to disk, creating the destination directory if
/// needed. Returns the path of the written file.
pub async fn download_video(
    url: &str,
    dest_dir: &Path,
    filename: &str,
) -> DownloadResult<PathBuf> {
    debug!(%url, "Fetching video");

    let response = reqwest::Client::new()
        .get(url)
        .send()
        .await
        .map_err(DownloadError::Network)?;

    let status = response.status();
    if !status.is_success() {
        return Err(DownloadError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    fs::create_dir_all(dest_dir).await?;
    let path = dest_dir.join(filename);
    let mut file = fs::File::create(&path).await?;

    let mut stream = response.bytes_stream();
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(DownloadError::Network)?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    info!(path = %path.display(), bytes = written, "Video downloaded");
    Ok(path)
}
