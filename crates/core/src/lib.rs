// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ph-core: Shared library for the pizza-hunt client
//!
//! This crate provides the data types, the durable local store, and the
//! response rules used by the pizza-hunt CLI and its offline queue.

pub mod error;
pub mod pizza;
pub mod protocol;
pub mod store;

pub use error::{Error, Result};
pub use pizza::{Pizza, Size};
pub use protocol::ResponseKind;
pub use store::{LocalStore, QueuedRecord};
