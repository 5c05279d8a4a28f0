// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! quill-sync: offline-first sync engine for quill notes.
//!
//! Local mutations are applied to the note collection immediately, recorded
//! in a durable pending queue, and replayed against the server when it can
//! be reached.
//!
//! # Architecture
//!
//! ```text
//!   add/update/delete          refresh_from_server
//!          │                          │
//!          ▼                          ▼
//! ┌─────────────────┐  kick   ┌─────────────┐     ┌─────────────┐
//! │   SyncEngine    │────────►│   Worker    │────►│ RemoteNotes │
//! │ (handle, sync)  │         │ (one task)  │◄────│   (trait)   │
//! └─────────────────┘         └─────────────┘     └─────────────┘
//!          │                     ▲      │
//!          ▼                     │      ▼
//! ┌─────────────────┐  ┌─────────────┐ ┌─────────────┐
//! │ NoteCollection  │  │Connectivity │ │  drain_all  │
//! │ + PendingQueue  │  │  (watch)    │ │ (FIFO pass) │
//! └─────────────────┘  └─────────────┘ └─────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   LocalStore    │  (notes + queue keys)
//! └─────────────────┘
//! ```
//!
//! # Features
//!
//! - Optimistic add/update/delete with temporary ids
//! - Durable pending queue, drained in order with whole-pass atomicity
//! - Temporary id rewrite when the server acknowledges a create
//! - Automatic sync on reconnect and after local mutations
//! - HTTP remote with bearer auth and a TCP reachability probe
//! - Injectable store, remote, and connectivity for testing

mod collection;
mod connectivity;
mod drain;
mod engine;
mod error;
mod queue;
mod remote;
mod state;
mod store;

pub use collection::NoteCollection;
pub use connectivity::{
    probe_target, spawn_probe, ConnectivityEvents, ConnectivityMonitor, ProbeConfig,
};
pub use engine::{SyncConfig, SyncEngine, SyncState};
pub use error::{Error, Result};
pub use queue::PendingQueue;
pub use remote::{
    HttpRemote, RemoteConfig, RemoteError, RemoteFuture, RemoteNotes, RemoteResult,
    IDEMPOTENCY_HEADER,
};
pub use store::{FileStore, LocalStore, MemoryStore, StoreError, StoreResult, NOTES_KEY, QUEUE_KEY};

#[cfg(test)]
mod test_helpers;
