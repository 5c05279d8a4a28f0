// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt::Write;
use std::path::Path;

use quill_core::{is_temp_id, Note, PendingOp};
use quill_sync::SyncState;

/// Marker shown next to notes the server has not acknowledged yet.
const UNSYNCED_MARKER: &str = " (not synced)";

/// One line per note: `id  title`.
pub fn format_note_line(note: &Note) -> String {
    let marker = if is_temp_id(&note.id) {
        UNSYNCED_MARKER
    } else {
        ""
    };
    format!("{}  {}{}", note.id, note.title, marker)
}

/// Full note details for `show`.
pub fn format_note_details(note: &Note) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}: {}", note.id, note.title);
    if is_temp_id(&note.id) {
        let _ = writeln!(out, "Status: not synced");
    }
    if let Some(image) = &note.image_uri {
        let _ = writeln!(out, "Image: {}", image);
    }
    out.push('\n');
    for line in note.description.lines() {
        let _ = writeln!(out, "  {}", line);
    }
    out
}

/// One line per pending operation: `kind target`.
pub fn format_pending_op(op: &PendingOp) -> String {
    format!("{:<6} {}", op.kind(), op.target_id())
}

/// Summary for `status`.
pub fn format_status(
    data_dir: &Path,
    server: &str,
    state: SyncState,
    note_count: usize,
    pending: &[PendingOp],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Data: {}", data_dir.display());
    let _ = writeln!(out, "Server: {}", server);
    let _ = writeln!(out, "State: {}", state);
    let _ = writeln!(out, "Notes: {}", note_count);
    let _ = writeln!(out, "Pending: {}", pending.len());
    for op in pending {
        let _ = writeln!(out, "  {}", format_pending_op(op));
    }
    out
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
