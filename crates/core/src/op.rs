// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pending operations.
//!
//! Every local mutation is recorded as a [`PendingOp`] until the server
//! acknowledges it. Ops are replayed against the server strictly in the order
//! they were recorded: a create must reach the server before any edit or
//! delete of the same note.

use serde::{Deserialize, Serialize};

use crate::note::{NoteDraft, NotePatch};

/// Kind of a pending operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    Add,
    Update,
    Delete,
}

impl OpKind {
    /// Returns the string representation used in logs and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Add => "add",
            OpKind::Update => "update",
            OpKind::Delete => "delete",
        }
    }
}

impl std::fmt::Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A mutation applied locally and not yet acknowledged by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum PendingOp {
    /// Create a note. `target_id` is the temporary id assigned locally.
    Add {
        target_id: String,
        payload: NoteDraft,
    },

    /// Change some fields of a note.
    Update {
        target_id: String,
        payload: NotePatch,
    },

    /// Delete a note.
    Delete { target_id: String },
}

impl PendingOp {
    /// Creates an Add op.
    pub fn add(target_id: String, payload: NoteDraft) -> Self {
        PendingOp::Add { target_id, payload }
    }

    /// Creates an Update op.
    pub fn update(target_id: String, payload: NotePatch) -> Self {
        PendingOp::Update { target_id, payload }
    }

    /// Creates a Delete op.
    pub fn delete(target_id: String) -> Self {
        PendingOp::Delete { target_id }
    }

    /// Returns the kind of this op.
    pub fn kind(&self) -> OpKind {
        match self {
            PendingOp::Add { .. } => OpKind::Add,
            PendingOp::Update { .. } => OpKind::Update,
            PendingOp::Delete { .. } => OpKind::Delete,
        }
    }

    /// Returns the id of the note this op applies to.
    pub fn target_id(&self) -> &str {
        match self {
            PendingOp::Add { target_id, .. }
            | PendingOp::Update { target_id, .. }
            | PendingOp::Delete { target_id } => target_id,
        }
    }

    /// Replaces `from` with `to` as the target id.
    ///
    /// Returns true if the op referenced `from`.
    pub fn rewrite_target(&mut self, from: &str, to: &str) -> bool {
        let target_id = match self {
            PendingOp::Add { target_id, .. }
            | PendingOp::Update { target_id, .. }
            | PendingOp::Delete { target_id } => target_id,
        };
        if target_id == from {
            *target_id = to.to_string();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
#[path = "op_tests.rs"]
mod tests;
