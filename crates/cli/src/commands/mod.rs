// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod config;
pub mod discard;
pub mod flush;
pub mod new;
pub mod pending;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
pub mod watch;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{get_state_dir, Config};
use crate::error::{Error, Result};
use crate::sync::{Notifier, StdoutNotifier, SubmissionQueue, SyncClient};

/// Effective configuration and where it came from.
pub struct Context {
    pub state_dir: PathBuf,
    pub config: Config,
}

impl Context {
    /// Resolve the state directory and load the effective configuration.
    pub fn load() -> Result<Self> {
        let state_dir = get_state_dir()?;
        let config = Config::load_effective(&state_dir)?;
        Ok(Context { state_dir, config })
    }

    /// Open the submission queue over HTTP.
    ///
    /// A store that fails to open still yields a queue; its operations are
    /// then no-ops.
    pub fn open_queue(&self) -> SubmissionQueue {
        self.open_queue_with(Arc::new(StdoutNotifier))
    }

    /// Open the queue, sending confirmations to `notifier`.
    pub fn open_queue_with(&self, notifier: Arc<dyn Notifier>) -> SubmissionQueue {
        SubmissionQueue::connect(
            &self.state_dir,
            &self.config.store.name,
            self.config.store.version,
            SyncClient::new(self.config.remote.resource_url()),
            notifier,
        )
    }
}

/// Drive `future` to completion on a fresh tokio runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Runtime(format!("tokio: {}", e)))?;
    Ok(rt.block_on(future))
}

/// English plural for pizza counts.
pub fn pizzas(count: usize) -> String {
    if count == 1 {
        "1 pizza".to_string()
    } else {
        format!("{} pizzas", count)
    }
}
