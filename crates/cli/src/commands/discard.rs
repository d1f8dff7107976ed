// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::{block_on, pizzas, Context};
use crate::error::Result;

/// Drop every saved pizza without submitting it.
pub fn run() -> Result<()> {
    let ctx = Context::load()?;
    let queue = ctx.open_queue();
    let removed = block_on(queue.discard())??;
    println!("{}", message(removed));
    Ok(())
}

pub(crate) fn message(removed: usize) -> String {
    if removed == 0 {
        "No pending pizzas.".to_string()
    } else {
        format!("Discarded {}.", pizzas(removed))
    }
}
