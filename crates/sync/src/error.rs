// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the sync engine.

use thiserror::Error;

use crate::remote::RemoteError;
use crate::store::StoreError;

/// Errors surfaced by the sync engine and its components.
///
/// `Validation` and `NotFound` are reported before anything is applied.
/// `Network` aborts a drain pass. `Storage` fails the local operation and
/// reverts the in-memory change.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid note: {0}")]
    Validation(String),

    #[error("note not found: {0}")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(#[from] RemoteError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("sync engine has stopped")]
    Stopped,
}

impl From<quill_core::Error> for Error {
    fn from(err: quill_core::Error) -> Self {
        match err {
            quill_core::Error::Validation(msg) => Error::Validation(msg),
        }
    }
}

/// Result type for sync engine operations.
pub type Result<T> = std::result::Result<T, Error>;
