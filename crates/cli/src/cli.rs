// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

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
#[command(name = "quill")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline-first notes that sync when the server is reachable")]
#[command(
    long_about = "Offline-first notes that sync when the server is reachable.\n\n\
    Edits are applied locally right away and queued. Run 'quill sync' to push them, \
    or 'quill watch' to sync automatically whenever the server can be reached."
)]
pub struct Cli {
    /// Path to the config file (default: <config dir>/quill/config.toml)
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Directory holding local notes and the pending queue
    #[arg(long, global = true, value_name = "path")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List notes
    List {
        /// Output format
        #[arg(long, short = 'o', value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Show a single note
    Show {
        /// Note ID
        id: String,

        /// Output format
        #[arg(long, short = 'o', value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Add a note
    Add {
        /// Note title
        #[arg(value_parser = non_empty_string)]
        title: String,

        /// Note body
        #[arg(value_parser = non_empty_string)]
        description: String,

        /// Attach an image reference
        #[arg(long, value_name = "uri")]
        image: Option<String>,
    },

    /// Edit a note
    Edit {
        /// Note ID
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New body
        #[arg(long)]
        description: Option<String>,

        /// New image reference
        #[arg(long, value_name = "uri")]
        image: Option<String>,
    },

    /// Delete a note
    #[command(alias = "delete")]
    Rm {
        /// Note ID
        id: String,
    },

    /// Send pending changes and refresh notes from the server
    Sync,

    /// Show pending changes and where data is kept
    Status {
        /// Output format
        #[arg(long, short = 'o', value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Stay running and sync whenever the server is reachable
    Watch,
}

impl Command {
    /// Log level used when `RUST_LOG` is not set.
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Command::Watch => "info",
            _ => "warn",
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
