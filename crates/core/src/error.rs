// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for ph-core operations.

use thiserror::Error;

/// All possible errors that can occur in ph-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid pizza size: '{0}'\n  hint: valid sizes are: Personal, Small, Medium, Large, Extra Large")]
    InvalidSize(String),

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("local store '{name}' is at version {stored}, cannot open at older version {requested}")]
    VersionDowngrade {
        name: String,
        stored: u32,
        requested: u32,
    },

    #[error("invalid store version {0}: versions start at 1")]
    InvalidVersion(u32),

    #[error("local store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for ph-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
