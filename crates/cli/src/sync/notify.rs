// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User-visible confirmations.
//!
//! The queue only ever tells the user about success; failures go to the log.

/// Shown after a flush delivered every queued pizza.
pub const FLUSH_CONFIRMATION: &str = "All saved pizza has been submitted!";

/// Sink for messages meant for the user rather than the log.
pub trait Notifier: Send + Sync {
    fn confirm(&self, message: &str);
}

/// Prints confirmations to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn confirm(&self, message: &str) {
        println!("{}", message);
    }
}

/// Prints confirmations to stderr, leaving stdout to machine-readable output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn confirm(&self, message: &str) {
        eprintln!("{}", message);
    }
}
