// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::Result;

use super::Context;

/// Push pending changes and pull the server listing.
///
/// Unlike `watch`, failures are reported: an unreachable server exits
/// non-zero and leaves the pending changes queued.
pub async fn run(ctx: &Context) -> Result<()> {
    let engine = ctx.offline_engine()?;
    let sent = engine.pending_count();
    let result = engine.refresh_from_server().await;
    let notes = engine.notes().len();
    let pending = engine.pending_count();
    engine.shutdown().await;

    result?;
    println!(
        "Synced {} change(s); {} note(s), {} pending",
        sent, notes, pending
    );
    Ok(())
}
