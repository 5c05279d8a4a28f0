// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity monitoring.
//!
//! A [`ConnectivityMonitor`] holds the current online/offline flag and
//! broadcasts changes. Whatever knows about the network (a platform hook, a
//! test, or the TCP probe in [`spawn_probe`]) drives the monitor, and the
//! sync engine listens through [`ConnectivityEvents`].

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Source of connectivity changes.
///
/// Clones share the same flag.
#[derive(Clone)]
pub struct ConnectivityMonitor {
    tx: Arc<watch::Sender<bool>>,
}

impl ConnectivityMonitor {
    /// Create a monitor with the given initial state.
    pub fn new(connected: bool) -> Self {
        let (tx, _rx) = watch::channel(connected);
        ConnectivityMonitor { tx: Arc::new(tx) }
    }

    /// Record the current state. Listeners are only woken on a change.
    pub fn set_connected(&self, connected: bool) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == connected {
                false
            } else {
                *current = connected;
                true
            }
        });
        if changed {
            info!(connected, "connectivity changed");
        }
    }

    /// Current state.
    pub fn is_connected(&self) -> bool {
        *self.tx.borrow()
    }

    /// Subscribe to changes.
    pub fn subscribe(&self) -> ConnectivityEvents {
        ConnectivityEvents {
            rx: self.tx.subscribe(),
        }
    }
}

/// Receiving side of a [`ConnectivityMonitor`].
pub struct ConnectivityEvents {
    rx: watch::Receiver<bool>,
}

impl ConnectivityEvents {
    /// Wait for the next change.
    ///
    /// Returns `None` once every monitor handle has been dropped.
    pub(crate) async fn changed(&mut self) -> Option<bool> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }

    /// Current state, marking it seen so `changed` only reports newer values.
    pub(crate) fn current(&mut self) -> bool {
        *self.rx.borrow_and_update()
    }
}

/// Timing for the reachability probe.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Time between checks while the server is reachable.
    pub interval: Duration,
    /// First retry delay after the server becomes unreachable.
    pub initial_delay: Duration,
    /// Cap for the retry delay.
    pub max_delay: Duration,
    /// Timeout for a single connect attempt.
    pub connect_timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            interval: Duration::from_secs(5),
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(3),
        }
    }
}

/// Host and port to probe for an API base URL.
///
/// Returns `None` if the URL has no host.
pub fn probe_target(url: &str) -> Option<(String, u16)> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_string();
    let port = parsed.port_or_known_default()?;
    Some((host, port))
}

/// Spawn a task that reports TCP reachability of `host:port` to `monitor`.
///
/// While the server answers, it is checked every `config.interval`. While it
/// does not, checks back off exponentially up to `config.max_delay`. The
/// task exits when `cancel` fires.
pub fn spawn_probe(
    host: String,
    port: u16,
    config: ProbeConfig,
    monitor: ConnectivityMonitor,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut delay = config.initial_delay;

        loop {
            let attempt = tokio::select! {
                _ = cancel.cancelled() => return,
                result = tokio::time::timeout(
                    config.connect_timeout,
                    TcpStream::connect((host.as_str(), port)),
                ) => result,
            };

            let wait = match attempt {
                Ok(Ok(_stream)) => {
                    monitor.set_connected(true);
                    delay = config.initial_delay;
                    config.interval
                }
                Ok(Err(e)) => {
                    debug!(host = %host, port, error = %e, "probe failed");
                    monitor.set_connected(false);
                    backoff(&mut delay, config.max_delay)
                }
                Err(_) => {
                    debug!(host = %host, port, "probe timed out");
                    monitor.set_connected(false);
                    backoff(&mut delay, config.max_delay)
                }
            };

            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(wait) => {}
            }
        }
    })
}

/// Return the current delay and double it for next time, up to `max`.
pub(crate) fn backoff(delay: &mut Duration, max: Duration) -> Duration {
    let current = *delay;
    *delay = std::cmp::min(delay.saturating_mul(2), max);
    current
}

#[cfg(test)]
#[path = "connectivity_tests.rs"]
mod tests;
