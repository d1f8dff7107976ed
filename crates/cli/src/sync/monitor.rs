// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity monitoring.
//!
//! A background task polls a [`Probe`] and reports offline/online transitions
//! through a channel. [`ConnectivityMonitor::run`] turns every transition to
//! online into a flush of the submission queue. Flapping is not debounced:
//! each transition triggers its own flush.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;

use super::queue::SubmissionQueue;
use super::transport::Transport;

/// Reachability check for the remote.
pub trait Probe: Send + Sync {
    /// True when the remote can currently be reached.
    fn check(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>>;
}

/// Probe that opens (and drops) a TCP connection to the remote.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    addr: String,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        TcpProbe {
            addr: addr.into(),
            timeout,
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl Probe for TcpProbe {
    fn check(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        Box::pin(async move {
            matches!(
                tokio::time::timeout(self.timeout, TcpStream::connect(&self.addr)).await,
                Ok(Ok(_))
            )
        })
    }
}

/// Online flag visible to both the polling task and its callers.
#[derive(Debug, Default)]
pub struct SharedConnectivity {
    online: AtomicBool,
}

impl SharedConnectivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    /// Store `online` and return the previous value.
    pub fn set(&self, online: bool) -> bool {
        self.online.swap(online, Ordering::AcqRel)
    }
}

/// Transitions reported by the polling task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityEvent {
    Online,
    Offline,
}

/// Cloneable sender for the "connection established" signal.
#[derive(Debug, Clone)]
pub struct OnlineTrigger {
    shared: Arc<SharedConnectivity>,
    event_tx: mpsc::Sender<ConnectivityEvent>,
}

impl OnlineTrigger {
    /// Mark the remote online and emit [`ConnectivityEvent::Online`].
    pub fn notify_online(&self) {
        self.shared.set(true);
        if self.event_tx.try_send(ConnectivityEvent::Online).is_err() {
            tracing::debug!("connectivity event dropped, channel full or closed");
        }
    }
}

/// Watches connectivity and drives queue flushes.
pub struct ConnectivityMonitor<P: Probe> {
    probe: Arc<P>,
    interval: Duration,
    shared: Arc<SharedConnectivity>,
    event_tx: mpsc::Sender<ConnectivityEvent>,
    cancel_token: CancellationToken,
}

impl<P: Probe + 'static> ConnectivityMonitor<P> {
    /// Create a monitor polling `probe` every `interval`.
    ///
    /// Returns the monitor and the receiver for its events.
    pub fn new(probe: P, interval: Duration) -> (Self, mpsc::Receiver<ConnectivityEvent>) {
        let (event_tx, event_rx) = mpsc::channel(16);
        let monitor = ConnectivityMonitor {
            probe: Arc::new(probe),
            interval,
            shared: Arc::new(SharedConnectivity::new()),
            event_tx,
            cancel_token: CancellationToken::new(),
        };
        (monitor, event_rx)
    }

    pub fn shared(&self) -> Arc<SharedConnectivity> {
        Arc::clone(&self.shared)
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Stop polling and end [`run`](Self::run).
    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    /// Probe once and record the result without emitting an event.
    pub async fn check_startup(&self) -> bool {
        let online = self.probe.check().await;
        self.shared.set(online);
        tracing::debug!(online, "initial connectivity");
        online
    }

    /// Probe once, emitting an event if the state changed.
    #[cfg(test)]
    pub(crate) async fn check_now(&self) -> bool {
        poll_once(
            self.probe.as_ref(),
            &self.shared,
            &self.event_tx,
            &self.cancel_token,
        )
        .await
    }

    /// Report that a connection was just established.
    ///
    /// Emits [`ConnectivityEvent::Online`] whatever the previous state was.
    pub fn notify_online(&self) {
        self.trigger().notify_online();
    }

    /// Handle for reporting established connections from another task.
    pub fn trigger(&self) -> OnlineTrigger {
        OnlineTrigger {
            shared: Arc::clone(&self.shared),
            event_tx: self.event_tx.clone(),
        }
    }

    /// Spawn the background polling task.
    pub fn spawn_poll_task(&self) -> JoinHandle<()> {
        let probe = Arc::clone(&self.probe);
        let shared = Arc::clone(&self.shared);
        let event_tx = self.event_tx.clone();
        let cancel_token = self.cancel_token.clone();
        let interval = self.interval;

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => return,
                    _ = tokio::time::sleep(interval) => {}
                }
                poll_once(probe.as_ref(), &shared, &event_tx, &cancel_token).await;
            }
        })
    }

    /// Flush once if already online, then flush on every online event until
    /// cancelled.
    ///
    /// Flushes run as separate tasks so a slow request never holds up the
    /// next trigger. Flushes still in flight at cancellation are aborted;
    /// their records stay queued.
    pub async fn run<T>(
        &self,
        queue: Arc<SubmissionQueue<T>>,
        mut events: mpsc::Receiver<ConnectivityEvent>,
    ) where
        T: Transport + 'static,
    {
        let mut flushes = JoinSet::new();

        if self.check_startup().await {
            tracing::info!("online at startup, flushing offline queue");
            spawn_flush(&mut flushes, &queue);
        }

        let poller = self.spawn_poll_task();

        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => break,
                Some(_) = flushes.join_next(), if !flushes.is_empty() => {}
                event = events.recv() => match event {
                    Some(ConnectivityEvent::Online) => {
                        tracing::info!("connection established, flushing offline queue");
                        spawn_flush(&mut flushes, &queue);
                    }
                    Some(ConnectivityEvent::Offline) => {
                        tracing::info!("connection lost");
                    }
                    None => break,
                },
            }
        }

        self.cancel_token.cancel();
        flushes.shutdown().await;
        if let Err(e) = poller.await {
            tracing::debug!(error = %e, "poll task ended abnormally");
        }
    }
}

fn spawn_flush<T: Transport + 'static>(flushes: &mut JoinSet<()>, queue: &Arc<SubmissionQueue<T>>) {
    let queue = Arc::clone(queue);
    flushes.spawn(async move {
        let outcome = queue.flush().await;
        tracing::debug!(?outcome, "triggered flush finished");
    });
}

async fn poll_once<P: Probe + ?Sized>(
    probe: &P,
    shared: &SharedConnectivity,
    event_tx: &mpsc::Sender<ConnectivityEvent>,
    cancel_token: &CancellationToken,
) -> bool {
    let online = probe.check().await;
    let was_online = shared.set(online);

    if online != was_online {
        let event = if online {
            ConnectivityEvent::Online
        } else {
            ConnectivityEvent::Offline
        };
        tracing::debug!(?event, "connectivity changed");
        tokio::select! {
            _ = cancel_token.cancelled() => {}
            _ = event_tx.send(event) => {}
        }
    }
    online
}
