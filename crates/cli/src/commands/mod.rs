// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod add;
pub mod edit;
pub mod list;
pub mod rm;
pub mod show;
pub mod status;
pub mod sync;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use quill_sync::{ConnectivityEvents, ConnectivityMonitor, FileStore, HttpRemote, SyncEngine};
use tracing::debug;

use crate::config::Config;
use crate::error::Result;

/// Settings resolved for this invocation.
pub struct Context {
    pub config: Config,
    pub data_dir: PathBuf,
}

impl Context {
    /// Open the local store and start an engine that reports to `connectivity`.
    pub fn start_engine(&self, connectivity: ConnectivityEvents) -> Result<SyncEngine> {
        let store = Arc::new(FileStore::open(&self.data_dir)?);
        let remote = HttpRemote::new(&self.config.remote_config())?;
        debug!(server = remote.base_url(), data_dir = %store.dir().display(), "opening engine");
        let engine = SyncEngine::start(store, remote, connectivity, self.config.sync_config())?;
        Ok(engine)
    }

    /// Start an engine that never syncs on its own.
    ///
    /// One-shot commands apply changes locally and leave them queued.
    pub fn offline_engine(&self) -> Result<SyncEngine> {
        self.start_engine(ConnectivityMonitor::new(false).subscribe())
    }
}
