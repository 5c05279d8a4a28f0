// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for quill-core operations.

use thiserror::Error;

/// All possible errors that can occur in quill-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid note: {0}")]
    Validation(String),
}

/// A specialized Result type for quill-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
