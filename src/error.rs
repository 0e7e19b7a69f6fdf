//! Global error handling for digestfs
//!
//! Only two failure classes are fatal: an invalid target directory and a
//! failed artifact write. Everything else (unreadable directories, unreadable
//! files, malformed notebooks) is recovered close to where it happens.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for digestfs operations
#[derive(Error, Debug)]
pub enum DigestError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON processing errors (notebook parsing)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Target path does not exist or is not a directory
    #[error("The specified path '{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The digest artifact could not be written
    #[error("Failed to write output file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Specialized Result type for digestfs operations
pub type Result<T> = std::result::Result<T, DigestError>;
