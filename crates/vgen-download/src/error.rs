//! Download error types.

use thiserror::Error;

pub type DownloadResult<T> = Result<T, DownloadError>;

#[derive(Debug, Error)]
pub enum DownloadError {
    /// Server responded with a non-2xx status.
    #[error("download failed with status {status}: {url}")]
    Status { status: u16, url: String },

    /// Network failure while fetching the video.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Local filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
