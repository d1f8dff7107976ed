// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline submission queue.
//!
//! Pizzas that could not be sent because the server was unreachable are
//! written to the [`LocalStore`]. A flush reads everything, sends it as one
//! batch, and clears what it sent only after the server confirms. Nothing
//! here returns an error to the caller: failures are logged and the records
//! stay queued for the next trigger.
//!
//! Flushes are not serialized. Two overlapping flushes may both send the same
//! batch; the server is expected to tolerate duplicates.

use std::path::Path;
use std::sync::Arc;

use ph_core::{LocalStore, QueuedRecord};
use serde_json::Value;

use super::client::{SubmitFailure, SubmitResult, SyncClient};
use super::notify::{Notifier, FLUSH_CONFIRMATION};
use super::transport::{HttpTransport, Transport};

/// Outcome of a flush attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum FlushOutcome {
    /// The local store never opened; nothing was attempted.
    StoreUnavailable,
    /// Reading or clearing the store failed.
    StoreError(String),
    /// Nothing was queued; no request was made.
    Empty,
    /// The server accepted the batch and the sent records were cleared.
    Flushed { count: usize },
    /// The batch was not accepted; the records are still queued.
    Failed {
        pending: usize,
        failure: SubmitFailure,
    },
}

/// Owns the local store and sends its contents to the server.
pub struct SubmissionQueue<T: Transport = HttpTransport> {
    /// `None` when the store could not be opened.
    store: Option<LocalStore>,
    client: SyncClient<T>,
    notifier: Arc<dyn Notifier>,
}

impl<T: Transport> SubmissionQueue<T> {
    pub fn new(store: Option<LocalStore>, client: SyncClient<T>, notifier: Arc<dyn Notifier>) -> Self {
        SubmissionQueue {
            store,
            client,
            notifier,
        }
    }

    /// Open the store `name` in `dir` and build a queue around it.
    ///
    /// A store that fails to open is logged and leaves the queue in a
    /// degraded mode where every operation is a no-op.
    pub fn connect(
        dir: &Path,
        name: &str,
        version: u32,
        client: SyncClient<T>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let store = match LocalStore::open(dir, name, version) {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!(error = %e, store = name, "local store unavailable, offline queue disabled");
                None
            }
        };
        Self::new(store, client, notifier)
    }

    /// True when the local store opened.
    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    pub fn client(&self) -> &SyncClient<T> {
        &self.client
    }

    /// Queue a payload whose direct submission failed for network reasons.
    ///
    /// Returns the assigned key, or `None` if the payload could not be stored.
    pub async fn enqueue_on_failure(&self, payload: Value) -> Option<i64> {
        let Some(store) = &self.store else {
            tracing::warn!("local store unavailable, submission dropped");
            return None;
        };

        match run_blocking(store, move |store| store.insert(&payload)).await {
            Ok(key) => {
                tracing::info!(key, "submission queued for later delivery");
                Some(key)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to queue submission");
                None
            }
        }
    }

    /// Every queued record, oldest first.
    pub async fn pending(&self) -> ph_core::Result<Vec<QueuedRecord>> {
        let store = self.require_store()?;
        run_blocking(store, |store| store.read_all()).await
    }

    /// Drop every queued record without sending it. Returns how many were dropped.
    pub async fn discard(&self) -> ph_core::Result<usize> {
        let store = self.require_store()?;
        let removed = run_blocking(store, |store| store.clear()).await?;
        tracing::info!(removed, "discarded queued submissions");
        Ok(removed)
    }

    /// Send everything queued as one batch.
    ///
    /// Read, send, and clear happen strictly in that order. Only records that
    /// were part of the accepted batch are cleared.
    pub async fn flush(&self) -> FlushOutcome {
        let Some(store) = &self.store else {
            tracing::warn!("local store unavailable, nothing to flush");
            return FlushOutcome::StoreUnavailable;
        };

        let records = match run_blocking(store, |store| store.read_all()).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = %e, "failed to read queued submissions");
                return FlushOutcome::StoreError(e.to_string());
            }
        };

        let Some(last_key) = records.last().map(|r| r.key) else {
            tracing::debug!("offline queue empty, nothing to flush");
            return FlushOutcome::Empty;
        };
        let count = records.len();

        match self.client.submit_batch(&records).await {
            SubmitResult::Accepted(_) => {
                if let Err(e) = run_blocking(store, move |store| store.clear_through(last_key)).await {
                    tracing::error!(error = %e, "server accepted batch but queue could not be cleared");
                    return FlushOutcome::StoreError(e.to_string());
                }
                tracing::info!(count, "flushed offline queue");
                self.notifier.confirm(FLUSH_CONFIRMATION);
                FlushOutcome::Flushed { count }
            }
            SubmitResult::Failed(failure) => {
                tracing::warn!(
                    %failure,
                    detail = ?failure.detail(),
                    pending = count,
                    "flush failed, submissions kept for retry"
                );
                FlushOutcome::Failed {
                    pending: count,
                    failure,
                }
            }
        }
    }

    fn require_store(&self) -> ph_core::Result<&LocalStore> {
        self.store
            .as_ref()
            .ok_or_else(|| ph_core::Error::StoreUnavailable("store was not opened".to_string()))
    }
}

/// Run a store operation on the blocking pool.
async fn run_blocking<R, F>(store: &LocalStore, op: F) -> ph_core::Result<R>
where
    R: Send + 'static,
    F: FnOnce(&LocalStore) -> ph_core::Result<R> + Send + 'static,
{
    let store = store.clone();
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| ph_core::Error::StoreUnavailable(format!("store task failed: {}", e)))?
}
