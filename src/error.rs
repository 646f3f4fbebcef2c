//! Error types for index building and querying.
//!
//! Only [`Error::NotFound`] and [`Error::Cancelled`] can fail a build. Per-file
//! problems (unreadable files, invalid UTF-8, oversized files) never surface
//! here; they are absorbed by the tokenizer and reported as
//! [`SkipReason`](crate::index::SkipReason) instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The root path does not exist or cannot be accessed
    #[error("path not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Cancellation was observed before the build completed
    #[error("indexing was cancelled")]
    Cancelled,

    /// Queries need at least one full trigram
    #[error("query must be at least 3 characters long: {0:?}")]
    InvalidQuery(String),

    /// Direct lookups take exactly one trigram
    #[error("trigram must be exactly 3 characters long: {0:?}")]
    InvalidTrigram(String),
}

impl Error {
    /// Whether this error came from a cancelled build
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}
