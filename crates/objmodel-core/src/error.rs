//! Error types for document encoding.
//!
//! Building, sorting and deduplicating a document cannot fail. The only
//! failure surfaced to callers is the sink rejecting a write.

use thiserror::Error;

/// Errors that can occur while encoding a document or value.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// The output sink rejected a write (closed, full, ...). Bytes already
    /// written are left on the sink for the caller to discard.
    #[error("failed to write encoded document: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        // Every value in the model is representable as JSON, so the writer
        // only fails when the underlying sink does.
        EncodeError::Io(err.into())
    }
}

/// Convenience alias used throughout objmodel-core.
pub type Result<T> = std::result::Result<T, EncodeError>;
