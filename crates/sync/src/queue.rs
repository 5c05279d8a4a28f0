// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pending operation queue.
//!
//! Holds every local mutation not yet acknowledged by the server, in the
//! order it was made. The whole queue is persisted on each change, and an
//! append is not acknowledged until it is durable. Entries leave the queue
//! only after a drain pass has sent all of them successfully.

use std::sync::Arc;

use quill_core::PendingOp;

use crate::error::Result;
use crate::store::{read_json, write_json, LocalStore, QUEUE_KEY};

/// Ordered, durable log of pending operations.
pub struct PendingQueue {
    ops: Vec<PendingOp>,
    store: Arc<dyn LocalStore>,
}

impl PendingQueue {
    /// Open the queue persisted in `store` (empty if none).
    pub fn open(store: Arc<dyn LocalStore>) -> Result<Self> {
        let ops = read_json(store.as_ref(), QUEUE_KEY)?.unwrap_or_default();
        Ok(PendingQueue { ops, store })
    }

    /// Append an operation.
    ///
    /// The operation is persisted before this returns; on failure it is
    /// not queued.
    pub fn enqueue(&mut self, op: PendingOp) -> Result<()> {
        self.ops.push(op);
        if let Err(e) = self.persist() {
            self.ops.pop();
            return Err(e);
        }
        Ok(())
    }

    /// All queued operations without removing them.
    pub fn peek_all(&self) -> &[PendingOp] {
        &self.ops
    }

    /// The operation at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&PendingOp> {
        self.ops.get(index)
    }

    /// Get the number of queued operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Clear all queued operations.
    ///
    /// Call this only after every queued operation reached the server.
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove_item(QUEUE_KEY)?;
        self.ops.clear();
        Ok(())
    }

    /// Remove the first N operations from the queue.
    ///
    /// Used after a drain pass to drop exactly the operations it sent,
    /// keeping anything enqueued while it ran.
    pub fn remove_first(&mut self, count: usize) -> Result<()> {
        if count >= self.ops.len() {
            return self.clear();
        }

        let removed: Vec<PendingOp> = self.ops.drain(..count).collect();
        if let Err(e) = self.persist() {
            self.ops.splice(0..0, removed);
            return Err(e);
        }
        Ok(())
    }

    /// Point every operation after `index` that targets `from` at `to`.
    ///
    /// Returns the number of operations rewritten.
    pub fn rewrite_after(&mut self, index: usize, from: &str, to: &str) -> Result<usize> {
        let previous = self.ops.clone();
        let mut rewritten = 0;
        for op in self.ops.iter_mut().skip(index + 1) {
            if op.rewrite_target(from, to) {
                rewritten += 1;
            }
        }

        if rewritten > 0 {
            if let Err(e) = self.persist() {
                self.ops = previous;
                return Err(e);
            }
        }
        Ok(rewritten)
    }

    fn persist(&self) -> Result<()> {
        write_json(self.store.as_ref(), QUEUE_KEY, &self.ops)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
