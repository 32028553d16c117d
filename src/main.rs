// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
use cli::{commands, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.log_filter().into()))
        .init();

    let result = match cli.command {
        Commands::Index {
            input,
            output,
            no_content,
            build_time,
        } => commands::index(&input, &output, no_content, build_time.as_deref()),
        Commands::Inspect { file } => commands::inspect(&file),
        Commands::Search {
            file,
            query,
            limit,
            json,
        } => commands::search(&file, &query, limit, json),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}
