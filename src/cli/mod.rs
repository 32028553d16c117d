// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the gleaner command-line interface.
//!
//! Three subcommands: `index` builds `search-index.json` from a content tree,
//! `inspect` summarizes an existing index, and `search` runs a query against
//! one exactly the way the browser would.

pub mod commands;
pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "gleaner",
    about = "Static-site search index builder and fuzzy query tool",
    version
)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter for the chosen verbosity; `RUST_LOG` still wins.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build search-index.json from a content tree
    Index {
        /// Input directory containing manifest.json and content files
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for search-index.json
        #[arg(short, long)]
        output: PathBuf,

        /// Leave body text out of the index (title, description and tags only)
        #[arg(long)]
        no_content: bool,

        /// Date stamped on standalone pages (RFC 3339), defaults to now
        #[arg(long)]
        build_time: Option<String>,
    },

    /// Summarize a search-index.json file
    Inspect {
        /// Path to search-index.json
        file: PathBuf,
    },

    /// Search a search-index.json file and display results
    Search {
        /// Path to search-index.json
        file: PathBuf,

        /// Search query
        query: String,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
}
