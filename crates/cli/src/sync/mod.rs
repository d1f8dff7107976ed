// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline submission and sync with the pizza API.
//!
//! Pizzas that cannot be created because the server is unreachable are kept
//! in a local store and sent as one batch once the connection comes back.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Queue     │────►│   Client    │────►│  Transport  │────► Remote API
//! │(Submission) │◄────│ (SyncClient)│◄────│   (trait)   │◄────
//! └─────────────┘     └─────────────┘     └─────────────┘
//!     ▲     │
//!     │     ▼
//! ┌─────────┐  ┌─────────────┐
//! │ Monitor │  │ LocalStore  │  (SQLite, survives restarts)
//! └─────────┘  └─────────────┘
//! ```
//!
//! # Features
//!
//! - Batch submission of every queued pizza in one request
//! - Queue cleared only after the server confirms
//! - Flush on startup and on every reconnect, polled through a probe
//! - Injectable transport and probe traits for testing

mod client;
mod monitor;
mod notify;
mod queue;
mod transport;

pub use client::{SubmitFailure, SubmitResult, SyncClient};
pub use monitor::{
    ConnectivityEvent, ConnectivityMonitor, OnlineTrigger, Probe, SharedConnectivity, TcpProbe,
};
pub use notify::{Notifier, StderrNotifier, StdoutNotifier, FLUSH_CONFIRMATION};
pub use queue::{FlushOutcome, SubmissionQueue};
pub use transport::{HttpTransport, Response, Transport, TransportError};

#[cfg(test)]
pub(crate) mod test_helpers;



#[cfg(test)]
mod monitor_tests;
