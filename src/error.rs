//! Error types for an outpainting run.

use std::path::PathBuf;
use std::time::Duration;

use crate::image::Dimensions;

/// Errors that can occur while preparing, editing, or post-processing images.
#[derive(Debug, thiserror::Error)]
pub enum OutpaintError {
    /// Required configuration is missing (e.g. no API key).
    #[error("configuration error: {0}")]
    Config(String),

    /// An expected input file does not exist.
    #[error("input image not found: {}", path.display())]
    MissingInput {
        /// The file that was looked for.
        path: PathBuf,
    },

    /// Source and mask images do not share the same resolution.
    #[error("source image is {image} but mask image is {mask}; resolutions must match")]
    ResolutionMismatch {
        /// Resolution of the source image.
        image: Dimensions,
        /// Resolution of the mask image.
        mask: Dimensions,
    },

    /// An input image could not be opened or its header could not be read.
    #[error("failed to read image {}: {source}", path.display())]
    Decode {
        /// The unreadable image.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: ::image::ImageError,
    },

    /// Failed to decode or re-encode an input image as RGBA.
    #[error("failed to convert {} to RGBA: {source}", path.display())]
    Conversion {
        /// The input or output path that failed.
        path: PathBuf,
        /// Codec error.
        #[source]
        source: ::image::ImageError,
    },

    /// Failed to resize a downloaded image.
    #[error("failed to resize {}: {source}", path.display())]
    Resize {
        /// The image being resized.
        path: PathBuf,
        /// Codec error.
        #[source]
        source: ::image::ImageError,
    },

    /// The result URL could not be fetched or written to disk.
    #[error("download from {url} failed: {source}")]
    Download {
        /// URL being fetched.
        url: String,
        /// What went wrong.
        #[source]
        source: DownloadFailure,
    },

    /// API key rejected by the service.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message reported by the service.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Delay suggested by the `Retry-After` header.
        retry_after: Option<Duration>,
    },

    /// Content was blocked by safety filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The service answered with something we could not use.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error (e.g. creating a folder or writing a download).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking image task panicked or was cancelled.
    #[error("image task failed: {0}")]
    Task(String),
}

/// Cause of a failed download.
#[derive(Debug, thiserror::Error)]
pub enum DownloadFailure {
    /// The server answered with a non-success status.
    #[error("server answered {0}")]
    Status(reqwest::StatusCode),

    /// The request failed or the body stream broke off.
    #[error("transfer failed: {0}")]
    Transfer(#[source] reqwest::Error),

    /// The body could not be written to the destination file.
    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),
}

impl From<tokio::task::JoinError> for OutpaintError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}

/// Result type alias for outpainting operations.
pub type Result<T> = std::result::Result<T, OutpaintError>;
