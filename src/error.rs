/// Error types for the gallery
///
/// Everything that can go wrong between the indexer, the IPFS gateway
/// and the config file funnels into `GalleryError`.
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by fetching, decoding, loading previews or reading config
#[derive(Debug, Error)]
pub enum GalleryError {
    /// Transport-level failure talking to the indexer or the gateway
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The indexer reported GraphQL errors instead of data
    #[error("indexer returned errors: {}", .messages.join("; "))]
    GraphQl { messages: Vec<String> },

    /// The response body did not match the expected shape
    #[error("failed to decode indexer response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Preview bytes could not be decoded as an image
    #[error("failed to decode image from {url}: {source}")]
    Image {
        url: String,
        #[source]
        source: image::ImageError,
    },

    /// A media load took longer than allowed
    #[error("loading {url} timed out after {}s", .after.as_secs())]
    Timeout { url: String, after: Duration },

    /// A record had no locator to load a preview from
    #[error("no preview locator for this record")]
    NoPreview,

    /// The config file exists but is not valid
    #[error("invalid config at {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Generic I/O error with path context
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A blocking task panicked or was cancelled
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl GalleryError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
