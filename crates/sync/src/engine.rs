// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The sync engine.
//!
//! [`SyncEngine`] is the handle the application talks to. Mutations are
//! applied and queued synchronously on the caller's thread; a single worker
//! task owns all network traffic and runs drain passes when connectivity
//! returns, after local mutations, and on explicit refresh.

use std::sync::Arc;
use std::time::Duration;

use quill_core::{Note, NoteDraft, NotePatch, PendingOp};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::connectivity::{backoff, ConnectivityEvents};
use crate::drain::drain_all;
use crate::error::{Error, Result};
use crate::remote::RemoteNotes;
use crate::state::{LocalState, Shared, STATE_DRAINING, STATE_IDLE, STATE_OFFLINE};
use crate::store::LocalStore;

/// Where the engine is in its sync cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Online with no pass running.
    Idle,
    /// A drain pass is in flight.
    Draining,
    /// Connectivity is down; mutations only queue.
    Offline,
}

impl SyncState {
    fn from_u8(value: u8) -> Self {
        match value {
            STATE_DRAINING => SyncState::Draining,
            STATE_OFFLINE => SyncState::Offline,
            _ => SyncState::Idle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SyncState::Idle => "idle",
            SyncState::Draining => "draining",
            SyncState::Offline => "offline",
        }
    }
}

impl std::fmt::Display for SyncState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine options.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Run a pass after each local mutation while online.
    pub sync_on_mutation: bool,
    /// Delay before retrying a pass that found the server unreachable while
    /// the monitor still reports online.
    pub retry_initial: Duration,
    /// Cap for the retry delay, which doubles after each unreachable pass.
    pub retry_max: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            sync_on_mutation: true,
            retry_initial: Duration::from_millis(500),
            retry_max: Duration::from_secs(30),
        }
    }
}

/// Requests from the handle to the worker.
enum Command {
    Refresh(oneshot::Sender<Result<()>>),
}

/// Offline-first notes engine.
///
/// One engine per session: create it with [`start`](Self::start) and stop it
/// with [`shutdown`](Self::shutdown). Dropping the handle also stops the
/// worker.
pub struct SyncEngine {
    shared: Arc<Shared>,
    commands: mpsc::Sender<Command>,
    /// Wakes the worker after a local mutation. Capacity one, so wakeups
    /// coalesce.
    kick: mpsc::Sender<()>,
    cancel: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl SyncEngine {
    /// Load local state from `store` and spawn the worker.
    ///
    /// If `connectivity` reports online, the worker immediately drains the
    /// queue and refreshes from the server. Must be called within a Tokio
    /// runtime.
    pub fn start<R>(
        store: Arc<dyn LocalStore>,
        remote: R,
        mut connectivity: ConnectivityEvents,
        config: SyncConfig,
    ) -> Result<Self>
    where
        R: RemoteNotes + 'static,
    {
        let local = LocalState::load(store)?;
        let online = connectivity.current();
        info!(
            notes = local.notes.len(),
            pending = local.queue.len(),
            online,
            "sync engine starting"
        );

        let initial = if online { STATE_IDLE } else { STATE_OFFLINE };
        let shared = Arc::new(Shared::new(local, initial));
        let (commands, command_rx) = mpsc::channel(8);
        let (kick, kicks) = mpsc::channel(1);
        let cancel = CancellationToken::new();

        let worker = Worker {
            shared: Arc::clone(&shared),
            remote,
            connectivity,
            commands: command_rx,
            kicks,
            cancel: cancel.clone(),
            retry_delay: config.retry_initial,
            retry_at: None,
            config,
            online,
        };
        let handle = tokio::spawn(worker.run());

        Ok(SyncEngine {
            shared,
            commands,
            kick,
            cancel,
            worker: Some(handle),
        })
    }

    /// Add a note. It is visible immediately under a temporary id.
    pub fn add_note(&self, draft: NoteDraft) -> Result<Note> {
        let note = self.shared.local().add(draft)?;
        self.notify_worker();
        Ok(note)
    }

    /// Edit the note `id`.
    pub fn update_note(&self, id: &str, patch: NotePatch) -> Result<()> {
        self.shared.local().update(id, patch)?;
        self.notify_worker();
        Ok(())
    }

    /// Delete the note `id`.
    pub fn delete_note(&self, id: &str) -> Result<()> {
        self.shared.local().delete(id)?;
        self.notify_worker();
        Ok(())
    }

    /// All notes in listing order.
    pub fn notes(&self) -> Vec<Note> {
        self.shared.local().notes.list().to_vec()
    }

    /// A single note by id.
    pub fn note(&self, id: &str) -> Option<Note> {
        self.shared.local().notes.get(id).cloned()
    }

    /// Number of operations waiting for the server.
    pub fn pending_count(&self) -> usize {
        self.shared.local().queue.len()
    }

    /// Operations waiting for the server, oldest first.
    pub fn pending_ops(&self) -> Vec<PendingOp> {
        self.shared.local().queue.peek_all().to_vec()
    }

    pub fn state(&self) -> SyncState {
        SyncState::from_u8(self.shared.state())
    }

    /// Drain the queue, then replace the collection with the server listing.
    ///
    /// Waits for any pass already running first. A network error leaves the
    /// queue and the collection as they were.
    pub async fn refresh_from_server(&self) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Refresh(reply))
            .await
            .map_err(|_| Error::Stopped)?;
        response.await.map_err(|_| Error::Stopped)?
    }

    fn notify_worker(&self) {
        // Full means a wakeup is already pending.
        let _ = self.kick.try_send(());
    }

    /// Stop the worker and wait for it to exit.
    ///
    /// A pass in flight is not interrupted; the worker stops after it.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(worker) = self.worker.take() {
            if let Err(e) = worker.await {
                warn!(error = %e, "sync worker ended abnormally");
            }
        }
        info!("sync engine stopped");
    }
}

impl Drop for SyncEngine {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Background task that owns the remote.
struct Worker<R> {
    shared: Arc<Shared>,
    remote: R,
    connectivity: ConnectivityEvents,
    commands: mpsc::Receiver<Command>,
    kicks: mpsc::Receiver<()>,
    cancel: CancellationToken,
    config: SyncConfig,
    /// Last state reported by the connectivity monitor.
    online: bool,
    /// Next delay for an unreachable retry.
    retry_delay: Duration,
    /// When the pending retry fires, if one is scheduled.
    retry_at: Option<Instant>,
}

impl<R: RemoteNotes> Worker<R> {
    async fn run(mut self) {
        if self.online {
            self.automatic_pass("startup").await;
        }

        let mut monitor_open = true;
        loop {
            let retry_at = self.retry_at;
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                command = self.commands.recv() => match command {
                    Some(Command::Refresh(reply)) => {
                        let result = self.pass().await;
                        let _ = reply.send(result);
                    }
                    None => break,
                },
                change = self.connectivity.changed(), if monitor_open => match change {
                    Some(true) => {
                        self.online = true;
                        self.automatic_pass("reconnect").await;
                    }
                    Some(false) => {
                        self.online = false;
                        self.retry_at = None;
                        self.shared.set_state(STATE_OFFLINE);
                    }
                    None => {
                        debug!("connectivity monitor closed");
                        monitor_open = false;
                    }
                },
                kick = self.kicks.recv() => {
                    if kick.is_none() {
                        break;
                    }
                    let pending = self.shared.local().queue.len();
                    if self.config.sync_on_mutation && self.online && pending > 0 {
                        self.automatic_pass("mutation").await;
                    }
                }
                _ = tokio::time::sleep_until(retry_at.unwrap_or_else(Instant::now)), if retry_at.is_some() => {
                    self.retry_at = None;
                    self.automatic_pass("retry").await;
                }
            }
        }

        debug!("sync worker exiting");
    }

    /// A pass nobody waits on: failures are logged, not returned.
    async fn automatic_pass(&mut self, trigger: &str) {
        if let Err(e) = self.pass().await {
            warn!(trigger, error = %e, "automatic sync failed");
        }
    }

    /// Drain, commit, and refresh, then settle the state.
    async fn pass(&mut self) -> Result<()> {
        // This pass covers every mutation made so far.
        while self.kicks.try_recv().is_ok() {}
        self.shared.set_state(STATE_DRAINING);
        let result = self.sync_once().await;

        // Connectivity changes seen during the pass are folded in here rather
        // than triggering another pass.
        self.online = self.connectivity.current();
        let unreachable = matches!(&result, Err(Error::Network(e)) if e.is_unreachable());
        let reachable = self.online && !unreachable;
        self.shared
            .set_state(if reachable { STATE_IDLE } else { STATE_OFFLINE });

        // The monitor only wakes the worker on a change, so an API that stops
        // answering while the monitor stays online is retried on a timer.
        if self.online && unreachable {
            let delay = backoff(&mut self.retry_delay, self.config.retry_max);
            debug!(delay_ms = delay.as_millis() as u64, "retrying unreachable server");
            self.retry_at = Some(Instant::now() + delay);
        } else {
            self.retry_delay = self.config.retry_initial;
            self.retry_at = None;
        }
        result
    }

    async fn sync_once(&self) -> Result<()> {
        let drained = drain_all(&self.shared, &self.remote).await?;
        if drained > 0 {
            self.shared.local().commit_pass(drained)?;
        }

        let listing = self.remote.list().await?;
        let count = listing.len();
        self.shared.local().reconcile(listing)?;
        info!(drained, notes = count, "sync pass complete");
        Ok(())
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
