// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the phrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] ph_core::Error),

    #[error("invalid remote URL '{0}'\n  hint: the remote must start with http:// or https://")]
    InvalidRemoteUrl(String),

    #[error("pizza was rejected by the server: {reason}")]
    Rejected { reason: String },

    #[error("local store unavailable: {0}\n  hint: pending pizzas cannot be listed or flushed")]
    StoreUnavailable(String),

    #[error("no state directory available\n  hint: set PIZZA_HUNT_DIR")]
    NoStateDir,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

/// A specialized Result type for phrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
