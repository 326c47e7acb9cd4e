use std::io;
use thiserror::Error;

/// Error type for readcorrect-io operations.
#[derive(Error, Debug)]
pub enum TrackIoError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A track file could not be opened.
    #[error("can't open {path}: {source}")]
    Open { path: String, source: io::Error },

    /// A value line appeared before any fixedStep header.
    #[error("{path}:{line}: value line before any fixedStep header")]
    ValueBeforeHeader { path: String, line: usize },

    /// A fixedStep header is malformed or incomplete.
    #[error("{path}:{line}: malformed fixedStep header: {reason}")]
    InvalidHeader {
        path: String,
        line: usize,
        reason: String,
    },

    /// A value line does not parse as the expected numeric type.
    #[error("{path}:{line}: expected {expected} value, got {token:?}")]
    InvalidValue {
        path: String,
        line: usize,
        expected: &'static str,
        token: String,
    },
}

/// Result type alias for readcorrect-io operations.
pub type Result<T> = std::result::Result<T, TrackIoError>;
