// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! quill-core: Shared types for the quill notes client
//!
//! This crate provides the note model, the pending operations recorded for
//! offline edits, and temporary id generation used by the sync engine and
//! the quill CLI.

pub mod error;
pub mod id;
pub mod note;
pub mod op;

pub use error::{Error, Result};
pub use id::{generate_temp_id, is_temp_id, TEMP_ID_PREFIX};
pub use note::{Note, NoteDraft, NotePatch};
pub use op::{OpKind, PendingOp};
