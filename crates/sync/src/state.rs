// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! State shared between the engine handle and its worker.
//!
//! The collection and the queue live together behind one mutex so that a
//! mutation (apply + enqueue) and a drain step (id rewrite, commit) are
//! never interleaved. The lock is only held for local work, never across a
//! network call.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quill_core::{Note, NoteDraft, NotePatch, PendingOp};
use tracing::error;

use crate::collection::NoteCollection;
use crate::error::{Error, Result};
use crate::queue::PendingQueue;
use crate::store::LocalStore;

/// State values for the atomic state field.
pub(crate) const STATE_IDLE: u8 = 0;
pub(crate) const STATE_DRAINING: u8 = 1;
pub(crate) const STATE_OFFLINE: u8 = 2;

/// Everything the handle and the worker both touch.
pub(crate) struct Shared {
    local: Mutex<LocalState>,
    /// Current sync state (atomic for lock-free reads).
    state: AtomicU8,
}

impl Shared {
    pub(crate) fn new(local: LocalState, state: u8) -> Self {
        Shared {
            local: Mutex::new(local),
            state: AtomicU8::new(state),
        }
    }

    /// Lock the local state, recovering from a poisoned lock.
    pub(crate) fn local(&self) -> MutexGuard<'_, LocalState> {
        self.local.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn state(&self) -> u8 {
        self.state.load(Ordering::Acquire)
    }

    pub(crate) fn set_state(&self, state: u8) {
        self.state.store(state, Ordering::Release);
    }
}

/// The note collection and its pending queue.
pub(crate) struct LocalState {
    pub(crate) notes: NoteCollection,
    pub(crate) queue: PendingQueue,
}

impl LocalState {
    /// Load both halves from the store.
    pub(crate) fn load(store: Arc<dyn LocalStore>) -> Result<Self> {
        Ok(LocalState {
            notes: NoteCollection::load(Arc::clone(&store))?,
            queue: PendingQueue::open(store)?,
        })
    }

    /// Optimistically add a note and queue its creation.
    pub(crate) fn add(&mut self, draft: NoteDraft) -> Result<Note> {
        draft.validate()?;
        let before = self.notes.snapshot();
        let note = self.notes.apply_add(draft.clone())?;
        self.enqueue_or_revert(PendingOp::add(note.id.clone(), draft), before)?;
        Ok(note)
    }

    /// Optimistically edit a note and queue the change.
    pub(crate) fn update(&mut self, id: &str, patch: NotePatch) -> Result<()> {
        patch.validate()?;
        if !self.notes.contains(id) {
            return Err(Error::NotFound(id.to_string()));
        }
        let before = self.notes.snapshot();
        self.notes.apply_update(id, &patch)?;
        self.enqueue_or_revert(PendingOp::update(id.to_string(), patch), before)
    }

    /// Optimistically remove a note and queue the deletion.
    pub(crate) fn delete(&mut self, id: &str) -> Result<()> {
        let before = self.notes.snapshot();
        self.notes.apply_delete(id)?;
        self.enqueue_or_revert(PendingOp::delete(id.to_string()), before)
    }

    /// Replace temporary id `from` with server id `to` in the collection and
    /// in every queued op after `index`.
    pub(crate) fn rewrite_id(&mut self, index: usize, from: &str, to: &str) -> Result<()> {
        let before = self.notes.snapshot();
        self.notes.rewrite_id(from, to)?;
        if let Err(e) = self.queue.rewrite_after(index, from, to) {
            self.revert(before);
            return Err(e);
        }
        Ok(())
    }

    /// Drop the `drained` ops a successful pass sent.
    pub(crate) fn commit_pass(&mut self, drained: usize) -> Result<()> {
        self.queue.remove_first(drained)
    }

    /// Replace the collection with a server listing, keeping queued changes
    /// visible on top.
    pub(crate) fn reconcile(&mut self, listing: Vec<Note>) -> Result<()> {
        self.notes.replace_all(listing, self.queue.peek_all())
    }

    fn enqueue_or_revert(&mut self, op: PendingOp, before: Vec<Note>) -> Result<()> {
        if let Err(e) = self.queue.enqueue(op) {
            self.revert(before);
            return Err(e);
        }
        Ok(())
    }

    fn revert(&mut self, before: Vec<Note>) {
        if let Err(e) = self.notes.restore(before) {
            error!(error = %e, "failed to persist reverted notes");
        }
    }
}
