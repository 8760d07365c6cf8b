//! Error types for the document model and the editing session.

use std::path::PathBuf;

use thiserror::Error;

/// Raised when [`Header::parse`](crate::document::Header::parse) is handed a
/// line that is not an ATX heading.
///
/// The document parsers only pass lines they already recognised as
/// headings, so seeing this means the caller broke that contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeadingError {
    #[error("not an ATX heading: {0:?}")]
    NotAHeading(String),
}

/// File I/O failures surfaced by a [`Session`](crate::session::Session).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no file is associated with this session")]
    NoPath,
}
