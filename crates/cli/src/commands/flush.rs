// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::{block_on, pizzas, Context};
use crate::error::{Error, Result};
use crate::sync::FlushOutcome;

/// Submit every saved pizza once.
///
/// The confirmation on success is printed by the queue's notifier.
pub fn run() -> Result<()> {
    let ctx = Context::load()?;
    let queue = ctx.open_queue();
    let outcome = block_on(queue.flush())?;

    if let Some(message) = describe(&outcome)? {
        println!("{}", message);
    }
    Ok(())
}

/// Message for a manual flush, if the notifier has not already said it.
///
/// A failed batch is not an error: the pizzas stay saved for the next try.
pub(crate) fn describe(outcome: &FlushOutcome) -> Result<Option<String>> {
    match outcome {
        FlushOutcome::StoreUnavailable => Err(Error::StoreUnavailable(
            "the local store could not be opened".to_string(),
        )),
        FlushOutcome::StoreError(reason) => Err(Error::StoreUnavailable(reason.clone())),
        FlushOutcome::Empty => Ok(Some("No pending pizzas.".to_string())),
        FlushOutcome::Flushed { .. } => Ok(None),
        FlushOutcome::Failed { pending, failure } => Ok(Some(format!(
            "Could not submit saved pizzas ({}), {} still pending.",
            failure,
            pizzas(*pending)
        ))),
    }
}

#[cfg(test)]
#[path = "flush_tests.rs"]
mod tests;
