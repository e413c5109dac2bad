//! Error types for the treefill crate

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or filling a tree
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Path does not exist
    #[error("path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    /// Root directory of the tree could not be created
    #[error("failed to create root directory {}: {source}", .path.display())]
    RootCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source image could not be decoded
    #[error("failed to decode source image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to encode or write a variant
    #[error("failed to write variant {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Source image color mode has no variant strategy
    #[error("unsupported image mode: {0}")]
    UnsupportedMode(String),

    /// Tree shape or fill parameters are unusable
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for treefill operations
pub type Result<T> = std::result::Result<T, Error>;
