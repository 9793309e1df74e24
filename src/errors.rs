/*!
 * Error types for the ytscribe application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when decoding a caption payload
#[derive(Error, Debug)]
pub enum CaptionError {
    /// The payload was sniffed as JSON but could not be parsed at all
    #[error("caption payload is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The payload parsed as JSON but matched neither an object with an
    /// `events` array nor a bare event array
    #[error("caption JSON has neither an `events` array nor a top-level array")]
    UnexpectedShape,
}

/// Errors that can occur while resolving or downloading a caption track
#[derive(Error, Debug)]
pub enum SourceError {
    /// The metadata resolver could not be spawned or exited with an error
    #[error("metadata resolver failed: {0}")]
    ResolverFailed(String),

    /// The metadata resolver exceeded its time budget
    #[error("metadata resolver timed out after {0} seconds")]
    ResolverTimeout(u64),

    /// The resolver output was not the JSON document we expect
    #[error("failed to parse video metadata: {0}")]
    MetadataParse(String),

    /// The video has no caption tracks in any language
    #[error("no caption tracks found for video '{0}'")]
    NoCaptions(String),

    /// Downloading the caption payload failed
    #[error("caption download failed: {0}")]
    DownloadFailed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the caption source
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Error from caption decoding
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
