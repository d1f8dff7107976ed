// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use ph_core::Pizza;
use serde_json::{json, Value};

use super::{block_on, Context};
use crate::cli::{OutputFormat, PizzaArgs};
use crate::error::{Error, Result};
use crate::sync::{
    Notifier, StderrNotifier, StdoutNotifier, SubmissionQueue, SubmitResult, Transport,
};

/// What happened to a pizza submitted from the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The server created it; carries the created resource.
    Created(Value),
    /// The server was unreachable; saved offline under this key.
    Queued(i64),
}

pub fn run(args: PizzaArgs, output: OutputFormat) -> Result<()> {
    let ctx = Context::load()?;
    // Keep stdout parseable when printing JSON.
    let notifier: Arc<dyn Notifier> = match output {
        OutputFormat::Text => Arc::new(StdoutNotifier),
        OutputFormat::Json => Arc::new(StderrNotifier),
    };
    let queue = ctx.open_queue_with(notifier);
    let pizza = args.to_pizza();

    let submission = block_on(submit_or_queue(&queue, &pizza))??;
    println!("{}", render(&pizza, &submission, output)?);
    Ok(())
}

/// Submit `pizza` directly, saving it offline if the server cannot be reached.
///
/// Only network-level failures are queued. A rejection by the server is
/// returned as an error so the user can fix the input. An accepted pizza
/// proves the server is reachable, so pizzas saved earlier are flushed too.
pub async fn submit_or_queue<T: Transport>(
    queue: &SubmissionQueue<T>,
    pizza: &Pizza,
) -> Result<Submission> {
    pizza.validate()?;
    let payload = pizza.to_payload()?;

    match queue.client().submit_one(&payload).await {
        SubmitResult::Accepted(body) => {
            if queue.is_available() {
                let outcome = queue.flush().await;
                tracing::debug!(?outcome, "flushed offline queue after direct submission");
            }
            Ok(Submission::Created(body))
        }
        SubmitResult::Failed(failure) if failure.is_network() => {
            tracing::info!(%failure, "server unreachable, saving pizza offline");
            queue
                .enqueue_on_failure(payload)
                .await
                .map(Submission::Queued)
                .ok_or_else(|| {
                    Error::StoreUnavailable("pizza could not be saved offline".to_string())
                })
        }
        SubmitResult::Failed(failure) => Err(Error::Rejected {
            reason: failure.to_string(),
        }),
    }
}

pub(crate) fn render(pizza: &Pizza, submission: &Submission, output: OutputFormat) -> Result<String> {
    let text = match (output, submission) {
        (OutputFormat::Json, Submission::Created(body)) => serde_json::to_string_pretty(body)?,
        (OutputFormat::Json, Submission::Queued(key)) => {
            serde_json::to_string_pretty(&json!({ "queued": true, "key": key }))?
        }
        (OutputFormat::Text, Submission::Created(body)) => match body.get("_id").and_then(Value::as_str) {
            Some(id) => format!("Created pizza '{}' ({})", pizza.pizza_name, id),
            None => format!("Created pizza '{}'", pizza.pizza_name),
        },
        (OutputFormat::Text, Submission::Queued(key)) => format!(
            "Server unreachable, pizza '{}' saved offline (#{}).\n\
             It will be submitted when the connection is back.",
            pizza.pizza_name, key
        ),
    };
    Ok(text)
}

#[cfg(test)]
#[path = "new_tests.rs"]
mod tests;
