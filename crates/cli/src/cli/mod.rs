// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use clap::{Parser, Subcommand, ValueEnum};

pub use args::PizzaArgs;

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "pizza")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Create pizzas, even while the pizza server is unreachable")]
#[command(
    long_about = "Create pizzas, even while the pizza server is unreachable.\n\n\
    Pizzas that cannot be sent are saved locally and submitted as one batch \
    when the connection comes back."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new pizza, saving it offline if the server is unreachable
    #[command(after_help = "\
Examples:
  pizza new -n Plain -b Sam                      Create a large plain pizza
  pizza new -n Veggie -b Al -s medium -t onion   Medium pizza with a topping")]
    New {
        #[command(flatten)]
        pizza: PizzaArgs,

        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List pizzas saved offline and not yet submitted
    Pending {
        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Submit every saved pizza now
    Flush,

    /// Watch the connection and submit saved pizzas whenever it comes back
    Watch,

    /// Drop every saved pizza without submitting it
    Discard,

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Configuration management commands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },
    /// Set the pizza server URL
    #[command(
        arg_required_else_help = true,
        after_help = "\
Examples:
  pizza config remote http://localhost:3001
  pizza config remote https://pizza.example.com"
    )]
    Remote {
        /// Base URL of the server (http:// or https://)
        url: String,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
