// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;

use quill_core::PendingOp;

use crate::cli::OutputFormat;
use crate::display::format_status;
use crate::error::Result;

use super::Context;

#[derive(Serialize)]
struct Status<'a> {
    data_dir: String,
    server: &'a str,
    notes: usize,
    pending: Vec<PendingOp>,
}

pub async fn run(ctx: &Context, format: OutputFormat) -> Result<()> {
    let engine = ctx.offline_engine()?;
    let notes = engine.notes().len();
    let pending = engine.pending_ops();
    let state = engine.state();
    engine.shutdown().await;

    let server = ctx.config.remote.url.as_str();
    match format {
        OutputFormat::Json => {
            let status = Status {
                data_dir: ctx.data_dir.display().to_string(),
                server,
                notes,
                pending,
            };
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        OutputFormat::Text => {
            print!(
                "{}",
                format_status(&ctx.data_dir, server, state, notes, &pending)
            );
        }
    }
    Ok(())
}
