// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.
//!
//! These structs are used with `#[command(flatten)]`.

use clap::Args;
use ph_core::{Pizza, Size};

use super::non_empty_string;

/// Fields of the pizza-creation form.
#[derive(Args, Clone, Debug)]
pub struct PizzaArgs {
    /// Name of the pizza
    #[arg(long, short = 'n', value_parser = non_empty_string)]
    pub name: String,

    /// Who is creating it
    #[arg(long = "by", short = 'b', value_parser = non_empty_string)]
    pub created_by: String,

    /// Size (personal, small, medium, large, extra-large)
    #[arg(long, short = 's', value_parser = parse_size, default_value = "large")]
    pub size: Size,

    /// Topping (repeat for more)
    #[arg(long = "topping", short = 't', value_parser = non_empty_string)]
    pub toppings: Vec<String>,
}

impl PizzaArgs {
    pub fn to_pizza(&self) -> Pizza {
        Pizza::new(&self.name, &self.created_by)
            .with_size(self.size)
            .with_toppings(&self.toppings)
    }
}

fn parse_size(s: &str) -> Result<Size, String> {
    s.parse().map_err(|e: ph_core::Error| e.to_string())
}
