// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::cli::OutputFormat;
use crate::display::format_note_details;
use crate::error::{Error, Result};

use super::Context;

pub async fn run(ctx: &Context, id: &str, format: OutputFormat) -> Result<()> {
    let engine = ctx.offline_engine()?;
    let note = engine.note(id);
    engine.shutdown().await;

    let note = note.ok_or_else(|| Error::NoteNotFound(id.to_string()))?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&note)?),
        OutputFormat::Text => print!("{}", format_note_details(&note)),
    }
    Ok(())
}
