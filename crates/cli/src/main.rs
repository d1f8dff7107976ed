// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use phrs::Cli;

fn main() {
    let cli = Cli::parse();
    phrs::logging::init();
    if let Err(e) = phrs::run(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
