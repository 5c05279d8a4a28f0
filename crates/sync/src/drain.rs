// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Drain pass: send queued operations to the server in order.

use quill_core::{is_temp_id, PendingOp};
use tracing::{debug, warn};

use crate::error::Result;
use crate::remote::{RemoteNotes, RemoteResult};
use crate::state::Shared;

/// Send every operation queued at the start of the pass, oldest first.
///
/// Stops at the first failure and leaves the queue untouched, so the next
/// pass resends everything. On success returns how many operations were
/// sent; the caller removes exactly that many from the front of the queue.
///
/// When an Add is acknowledged, its temporary id is replaced by the server id
/// in the collection and in every later queued operation before the next
/// operation is sent. Ops enqueued while the pass runs are left for the next
/// pass.
pub(crate) async fn drain_all<R>(shared: &Shared, remote: &R) -> Result<usize>
where
    R: RemoteNotes + ?Sized,
{
    let total = shared.local().queue.len();

    for index in 0..total {
        let op = shared.local().queue.get(index).cloned();
        let Some(op) = op else {
            break;
        };
        debug!(index, kind = %op.kind(), target = op.target_id(), "sending op");

        match op {
            PendingOp::Add { target_id, payload } => {
                let id = remote.create(payload, target_id.clone()).await?;
                debug!(temp_id = %target_id, id = %id, "note created");
                shared.local().rewrite_id(index, &target_id, &id)?;
            }
            PendingOp::Update { target_id, payload } => {
                if skip_orphan(&target_id) {
                    continue;
                }
                let result = remote.update(target_id.clone(), payload).await;
                tolerate_missing(result, "update", &target_id)?;
            }
            PendingOp::Delete { target_id } => {
                if skip_orphan(&target_id) {
                    continue;
                }
                let result = remote.delete(target_id.clone()).await;
                tolerate_missing(result, "delete", &target_id)?;
            }
        }
    }

    Ok(total)
}

/// An edit still aimed at a temporary id has no Add before it to create the
/// note; there is nothing on the server to send it to.
fn skip_orphan(target_id: &str) -> bool {
    if is_temp_id(target_id) {
        warn!(target = target_id, "skipping op for note that was never created");
        return true;
    }
    false
}

/// A 404 means the note is already gone on the server.
fn tolerate_missing(result: RemoteResult<()>, action: &str, target_id: &str) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.is_not_found() => {
            warn!(target = target_id, action, "note missing on server, skipping");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
