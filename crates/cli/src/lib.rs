// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! phrs - pizza creation client with an offline submission queue.
//!
//! This crate provides the functionality behind the `pizza` CLI. Pizzas are
//! submitted to the pizza API; when the server cannot be reached they are
//! saved in a local SQLite store and sent as one batch once it is back.
//!
//! # Main Components
//!
//! - [`sync::SubmissionQueue`] - offline queue over the local store
//! - [`sync::SyncClient`] - batch and single submission to the API
//! - [`sync::ConnectivityMonitor`] - flushes the queue on reconnect
//! - [`Config`] - remote, store and monitor settings
//! - [`Error`] - Error types for all operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use phrs::sync::{StdoutNotifier, SubmissionQueue, SyncClient};
//!
//! let queue = SubmissionQueue::connect(
//!     &state_dir,
//!     "pizza_hunt",
//!     1,
//!     SyncClient::new("http://localhost:3001/api/pizzas"),
//!     Arc::new(StdoutNotifier),
//! );
//! queue.enqueue_on_failure(payload).await;
//! queue.flush().await;
//! ```

mod cli;
mod commands;

pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod sync;

pub use cli::{Cli, Command, ConfigCommand, OutputFormat, PizzaArgs};
pub use config::{get_state_dir, Config};
pub use error::{Error, Result};

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::New { pizza, output } => commands::new::run(pizza, output),
        Command::Pending { output } => commands::pending::run(output),
        Command::Flush => commands::flush::run(),
        Command::Watch => commands::watch::run(),
        Command::Discard => commands::discard::run(),
        Command::Config(cmd) => commands::config::run(cmd),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
