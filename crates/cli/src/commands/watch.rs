// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use quill_sync::{probe_target, spawn_probe, ConnectivityMonitor};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::{Error, Result};

use super::Context;

/// Sync in the foreground until Ctrl-C.
///
/// A TCP probe against the server host drives connectivity, and the engine
/// drains the queue each time the server becomes reachable. The local store
/// stays locked meanwhile, so other `quill` commands report it as in use.
pub async fn run(ctx: &Context) -> Result<()> {
    let url = ctx.config.remote.url.clone();
    let (host, port) =
        probe_target(&url).ok_or_else(|| Error::NoProbeTarget { url: url.clone() })?;

    let monitor = ConnectivityMonitor::new(false);
    let engine = ctx.start_engine(monitor.subscribe())?;

    let cancel = CancellationToken::new();
    let probe = spawn_probe(
        host,
        port,
        ctx.config.probe_config(),
        monitor.clone(),
        cancel.clone(),
    );
    info!(server = %url, data_dir = %ctx.data_dir.display(), "watching for connectivity");

    let signal = tokio::signal::ctrl_c().await;

    cancel.cancel();
    let _ = probe.await;
    let pending = engine.pending_count();
    engine.shutdown().await;
    info!(pending, online = monitor.is_connected(), "stopped");

    signal?;
    Ok(())
}
