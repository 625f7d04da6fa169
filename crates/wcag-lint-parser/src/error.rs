//! Error types for the HTML tree loader.
//!
//! Parsing an in-memory string never fails: malformed markup is recovered by
//! the HTML5 tree builder. The only failure left is reading a document from
//! disk, reported as [`ParseError::Io`].

use std::path::PathBuf;
use thiserror::Error;

/// An error that occurs while loading a document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file could not be read.
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for loader operations
pub type ParseResult<T> = Result<T, ParseError>;
