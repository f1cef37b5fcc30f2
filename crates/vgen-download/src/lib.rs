//! Finished-video download helper.
//!
//! Derives a stable download filename from the original prompt and
//! streams the finished video from its URL to disk. Download failures
//! are reported to the caller and never affect job state.

pub mod error;
pub mod fetch;
pub mod filename;

pub use error::{DownloadError, DownloadResult};
pub use fetch::download_video;
pub use filename::derive_filename;
