// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory note collection backed by the local store.
//!
//! Every successful mutation writes the full snapshot to the store before
//! returning. If that write fails the in-memory change is rolled back, so
//! memory never runs ahead of what a restart would recover.

use std::sync::Arc;

use quill_core::{generate_temp_id, Note, NoteDraft, NotePatch, PendingOp};

use crate::error::{Error, Result};
use crate::store::{read_json, write_json, LocalStore, NOTES_KEY};

/// Ordered notes for the current session.
pub struct NoteCollection {
    notes: Vec<Note>,
    store: Arc<dyn LocalStore>,
}

impl NoteCollection {
    /// Load the last persisted snapshot (empty if none).
    pub fn load(store: Arc<dyn LocalStore>) -> Result<Self> {
        let notes = read_json(store.as_ref(), NOTES_KEY)?.unwrap_or_default();
        Ok(NoteCollection { notes, store })
    }

    /// All notes in listing order.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    /// Look up a note by id.
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Check whether a note with `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.notes.len()
    }

    /// Insert a new note under a fresh temporary id.
    pub fn apply_add(&mut self, draft: NoteDraft) -> Result<Note> {
        let mut id = generate_temp_id();
        while self.contains(&id) {
            id = generate_temp_id();
        }

        let note = Note::from_draft(id, draft);
        let previous = self.notes.clone();
        self.notes.push(note.clone());
        self.persist_or_rollback(previous)?;
        Ok(note)
    }

    /// Merge `patch` into the note with `id`.
    pub fn apply_update(&mut self, id: &str, patch: &NotePatch) -> Result<()> {
        let index = self.position(id)?;
        let previous = self.notes.clone();
        self.notes[index].merge(patch);
        self.persist_or_rollback(previous)
    }

    /// Remove the note with `id`, returning it.
    pub fn apply_delete(&mut self, id: &str) -> Result<Note> {
        let index = self.position(id)?;
        let previous = self.notes.clone();
        let removed = self.notes.remove(index);
        self.persist_or_rollback(previous)?;
        Ok(removed)
    }

    /// Replace everything with a server listing.
    ///
    /// The still-pending operations are replayed on top of the listing, so
    /// notes whose Add has not been acknowledged survive and unacknowledged
    /// edits and deletes stay visible.
    pub fn replace_all(&mut self, listing: Vec<Note>, pending: &[PendingOp]) -> Result<()> {
        let mut notes = listing;
        for op in pending {
            overlay(&mut notes, op);
        }
        let previous = std::mem::replace(&mut self.notes, notes);
        self.persist_or_rollback(previous)
    }

    /// Rename a note from `from` to `to`.
    ///
    /// Returns false (and writes nothing) if no note has id `from`.
    pub fn rewrite_id(&mut self, from: &str, to: &str) -> Result<bool> {
        let Some(index) = self.notes.iter().position(|n| n.id == from) else {
            return Ok(false);
        };
        let previous = self.notes.clone();
        self.notes[index].id = to.to_string();
        self.persist_or_rollback(previous)?;
        Ok(true)
    }

    /// Copy of the current notes, for undoing a compound change.
    pub(crate) fn snapshot(&self) -> Vec<Note> {
        self.notes.clone()
    }

    /// Put back a snapshot taken with [`snapshot`](Self::snapshot).
    ///
    /// Memory is restored even if the write fails.
    pub(crate) fn restore(&mut self, snapshot: Vec<Note>) -> Result<()> {
        self.notes = snapshot;
        write_json(self.store.as_ref(), NOTES_KEY, &self.notes)?;
        Ok(())
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn persist_or_rollback(&mut self, previous: Vec<Note>) -> Result<()> {
        if let Err(e) = write_json(self.store.as_ref(), NOTES_KEY, &self.notes) {
            self.notes = previous;
            return Err(e.into());
        }
        Ok(())
    }
}

/// Apply one pending op to a list of notes, ignoring ops whose target is gone.
fn overlay(notes: &mut Vec<Note>, op: &PendingOp) {
    match op {
        PendingOp::Add { target_id, payload } => {
            if !notes.iter().any(|n| n.id == *target_id) {
                notes.push(Note::from_draft(target_id.clone(), payload.clone()));
            }
        }
        PendingOp::Update { target_id, payload } => {
            if let Some(note) = notes.iter_mut().find(|n| n.id == *target_id) {
                note.merge(payload);
            }
        }
        PendingOp::Delete { target_id } => notes.retain(|n| n.id != *target_id),
    }
}

#[cfg(test)]
#[path = "collection_tests.rs"]
mod tests;
