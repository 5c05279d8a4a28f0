// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! quillcli - command line front end for quill notes.
//!
//! Notes live in a local data directory and are changed offline; the
//! [`quill_sync`] engine pushes queued changes to the notes API when asked
//! (`quill sync`) or whenever the server is reachable (`quill watch`).
//!
//! # Main Components
//!
//! - [`Cli`] / [`Command`] - argument parsing
//! - [`Config`] - `config.toml` with defaults for every field
//! - [`Error`] - error type for all commands

mod cli;
mod commands;
mod display;
mod logging;

pub mod config;
pub mod error;

pub use cli::{Cli, Command, OutputFormat};
pub use config::Config;
pub use error::{Error, Result};

use commands::Context;

/// Execute a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    logging::setup_logging(cli.command.default_log_level());

    let config = Config::resolve(cli.config.as_deref())?;
    let data_dir = config.data_dir(cli.data_dir.as_deref())?;
    let ctx = Context { config, data_dir };

    match cli.command {
        Command::List { format } => commands::list::run(&ctx, format).await,
        Command::Show { id, format } => commands::show::run(&ctx, &id, format).await,
        Command::Add {
            title,
            description,
            image,
        } => commands::add::run(&ctx, title, description, image).await,
        Command::Edit {
            id,
            title,
            description,
            image,
        } => commands::edit::run(&ctx, &id, title, description, image).await,
        Command::Rm { id } => commands::rm::run(&ctx, &id).await,
        Command::Sync => commands::sync::run(&ctx).await,
        Command::Status { format } => commands::status::run(&ctx, format).await,
        Command::Watch => commands::watch::run(&ctx).await,
    }
}
