// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use quill_sync::{RemoteError, StoreError};

/// Errors reported by the `quill` command line.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Sync(#[from] quill_sync::Error),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Remote(#[from] RemoteError),

    #[error("config error: {0}")]
    Config(String),

    #[error("could not determine a data directory\n  hint: pass --data-dir or set data_dir in the config file")]
    NoDataDir,

    #[error("cannot watch {url}: no host to probe\n  hint: set remote.url to an http:// or https:// URL")]
    NoProbeTarget { url: String },

    #[error("note not found: {0}")]
    NoteNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
