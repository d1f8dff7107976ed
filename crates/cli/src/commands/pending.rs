// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use ph_core::QueuedRecord;
use serde_json::{json, Value};

use super::{block_on, pizzas, Context};
use crate::cli::OutputFormat;
use crate::error::Result;

/// List pizzas saved offline.
pub fn run(output: OutputFormat) -> Result<()> {
    let ctx = Context::load()?;
    let queue = ctx.open_queue();
    let records = block_on(queue.pending())??;
    println!("{}", render(&records, output)?);
    Ok(())
}

pub(crate) fn render(records: &[QueuedRecord], output: OutputFormat) -> Result<String> {
    match output {
        OutputFormat::Json => {
            let items: Vec<Value> = records
                .iter()
                .map(|r| {
                    json!({
                        "key": r.key,
                        "queuedAt": r.queued_at.to_rfc3339(),
                        "payload": r.payload,
                    })
                })
                .collect();
            Ok(serde_json::to_string_pretty(&items)?)
        }
        OutputFormat::Text => {
            if records.is_empty() {
                return Ok("No pending pizzas.".to_string());
            }
            let mut lines = vec![format!("{} waiting to be submitted:", pizzas(records.len()))];
            lines.extend(records.iter().map(format_record));
            Ok(lines.join("\n"))
        }
    }
}

/// One line per record: key, time queued, and a short summary of the payload.
pub(crate) fn format_record(record: &QueuedRecord) -> String {
    let field = |name: &str| record.payload.get(name).and_then(Value::as_str);
    let summary = match (field("pizzaName"), field("createdBy")) {
        (Some(name), Some(by)) => match field("size") {
            Some(size) => format!("{} by {} ({})", name, by, size),
            None => format!("{} by {}", name, by),
        },
        _ => record.payload.to_string(),
    };
    format!(
        "  #{:<4} {}  {}",
        record.key,
        record.queued_at.format("%Y-%m-%d %H:%M:%S"),
        summary
    )
}

#[cfg(test)]
#[path = "pending_tests.rs"]
mod tests;
