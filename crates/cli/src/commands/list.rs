// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::cli::OutputFormat;
use crate::display::format_note_line;
use crate::error::Result;

use super::Context;

pub async fn run(ctx: &Context, format: OutputFormat) -> Result<()> {
    let engine = ctx.offline_engine()?;
    let notes = engine.notes();
    engine.shutdown().await;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&notes)?);
        }
        OutputFormat::Text => {
            for note in &notes {
                println!("{}", format_note_line(note));
            }
        }
    }
    Ok(())
}
