// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync tests.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use quill_core::{Note, NoteDraft, NotePatch};
use tokio::sync::Semaphore;

use crate::remote::{RemoteError, RemoteFuture, RemoteNotes, RemoteResult};

/// Create a note as the server would return it.
pub fn server_note(id: &str, title: &str) -> Note {
    Note {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("<p>{}</p>", title),
        image_uri: None,
    }
}

/// A call received by [`MockRemote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create { key: String, title: String },
    Update { id: String, patch: NotePatch },
    Delete { id: String },
}

impl Call {
    pub fn kind(&self) -> &'static str {
        match self {
            Call::List => "list",
            Call::Create { .. } => "create",
            Call::Update { .. } => "update",
            Call::Delete { .. } => "delete",
        }
    }
}

#[derive(Default)]
struct MockState {
    calls: Vec<Call>,
    server: Vec<Note>,
    next_id: u32,
    /// 1-based call number that fails once.
    fail_call: Option<usize>,
    unreachable: bool,
}

/// In-memory notes server for testing without real sockets.
///
/// Behaves like the real API: creates issue `real{n}` ids, and updates or
/// deletes of unknown ids answer NotFound. Clones share state, so a test can
/// keep a handle after giving one to the engine.
#[derive(Clone, Default)]
pub struct MockRemote {
    state: Arc<Mutex<MockState>>,
    /// When set, every call waits for a permit first.
    gate: Option<Arc<Semaphore>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose calls block until permits are added to `gate`.
    pub fn gated(gate: Arc<Semaphore>) -> Self {
        MockRemote {
            state: Arc::default(),
            gate: Some(gate),
        }
    }

    /// Put notes on the server.
    pub fn seed(&self, notes: Vec<Note>) {
        self.lock().server = notes;
    }

    /// Notes currently on the server.
    pub fn server_notes(&self) -> Vec<Note> {
        self.lock().server.clone()
    }

    /// Remove a note behind the client's back.
    pub fn remove_on_server(&self, id: &str) {
        self.lock().server.retain(|n| n.id != id);
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Call kinds received so far, in order.
    pub fn call_kinds(&self) -> Vec<&'static str> {
        self.lock().calls.iter().map(Call::kind).collect()
    }

    /// Make the `n`th call (1-based, counting from creation) fail once.
    pub fn fail_call(&self, n: usize) {
        self.lock().fail_call = Some(n);
    }

    /// Make every call fail as if the network were down. Calls are still
    /// recorded.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.lock().unreachable = unreachable;
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    async fn wait_turn(&self) {
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
    }

    /// Record a call and decide whether it fails.
    fn record(&self, call: Call) -> RemoteResult<MutexGuard<'_, MockState>> {
        let mut state = self.lock();
        state.calls.push(call);
        if state.unreachable {
            return Err(RemoteError::Unreachable("mock network down".into()));
        }
        if state.fail_call == Some(state.calls.len()) {
            state.fail_call = None;
            return Err(RemoteError::Status {
                status: 500,
                message: "mock failure".into(),
            });
        }
        Ok(state)
    }
}

impl RemoteNotes for MockRemote {
    fn list(&self) -> RemoteFuture<'_, Vec<Note>> {
        Box::pin(async move {
            self.wait_turn().await;
            let state = self.record(Call::List)?;
            Ok(state.server.clone())
        })
    }

    fn create(&self, draft: NoteDraft, idempotency_key: String) -> RemoteFuture<'_, String> {
        Box::pin(async move {
            self.wait_turn().await;
            let mut state = self.record(Call::Create {
                key: idempotency_key,
                title: draft.title.clone(),
            })?;
            state.next_id += 1;
            let id = format!("real{}", state.next_id);
            state.server.push(Note::from_draft(id.clone(), draft));
            Ok(id)
        })
    }

    fn update(&self, id: String, patch: NotePatch) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            self.wait_turn().await;
            let mut state = self.record(Call::Update {
                id: id.clone(),
                patch: patch.clone(),
            })?;
            match state.server.iter_mut().find(|n| n.id == id) {
                Some(note) => {
                    note.merge(&patch);
                    Ok(())
                }
                None => Err(RemoteError::NotFound(id)),
            }
        })
    }

    fn delete(&self, id: String) -> RemoteFuture<'_, ()> {
        Box::pin(async move {
            self.wait_turn().await;
            let mut state = self.record(Call::Delete { id: id.clone() })?;
            let before = state.server.len();
            state.server.retain(|n| n.id != id);
            if state.server.len() == before {
                Err(RemoteError::NotFound(id))
            } else {
                Ok(())
            }
        })
    }
}

/// Poll `condition` until it holds, failing the test after two seconds.
pub async fn wait_until<F: FnMut() -> bool>(mut condition: F) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached in time"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
