//! Error types for the task client.
//!
//! # Design
//! `ApiError` follows the three ways a round-trip can fail: the transport
//! never produced a response, the server answered with a non-2xx status, or
//! the body could not be decoded. `NotFound` gets a dedicated variant because
//! callers distinguish "the task is gone" from other unexpected statuses.
//!
//! `StoreError` is what `TaskStore` operations return; it wraps `ApiError`
//! and adds the local refusals that happen before any request is issued.

use thiserror::Error;

use crate::types::TaskId;

/// Errors produced while building, executing or parsing an API request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never reached the server or no response was received.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Reasons the task form refuses to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("title is required")]
    EmptyTitle,

    #[error("a submission is already in flight")]
    AlreadySubmitting,
}

/// Errors returned by `TaskStore` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Form(#[from] FormError),

    /// The id is not in the locally loaded list.
    #[error("task {0} is not in the list")]
    UnknownTask(TaskId),

    /// `confirm_delete` was called with no dialog open.
    #[error("no task is pending deletion")]
    NoPendingDeletion,
}
