//! Error types for the feedcal pipeline.

use thiserror::Error;

/// Errors that can occur while fetching or loading a calendar feed.
///
/// None of these ever reach an end user: the pipeline recovers each one at
/// its own boundary and carries on with an empty result.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Feed responded with HTTP {0}")]
    Status(u16),

    #[error("Invalid feed URL '{0}'")]
    InvalidUrl(String),

    #[error("ICS parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for feedcal operations.
pub type FeedResult<T> = Result<T, FeedError>;
