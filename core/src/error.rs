//! Error types for the bookstore client core.
//!
//! # Design
//! `ApiError` covers everything that can go wrong with one round-trip to the
//! collection resource. `NotFound` keeps its own variant because the editor
//! logs it differently from other rejections. `ErrorKind` folds the variants
//! into the three failure classes the views report on.
//!
//! `ViewError` is returned when a view refuses to start an operation.

use thiserror::Error;

/// Errors produced while building a request or interpreting its outcome.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    /// Produced by the host, never by the parser.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("book not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("unexpected payload: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Failure class of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Status,
    Payload,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::NotFound | ApiError::HttpError { .. } => ErrorKind::Status,
            ApiError::DeserializationError(_) | ApiError::SerializationError(_) => {
                ErrorKind::Payload
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

/// Reasons a view declines to start an operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    /// Another operation of this view is still waiting for its response.
    #[error("another request is still in flight")]
    Busy,

    /// The view has no loaded record to act on.
    #[error("nothing is loaded")]
    NotReady,

    #[error(transparent)]
    Request(#[from] ApiError),
}
