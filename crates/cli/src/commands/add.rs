// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use quill_core::NoteDraft;

use crate::error::Result;

use super::Context;

pub async fn run(
    ctx: &Context,
    title: String,
    description: String,
    image: Option<String>,
) -> Result<()> {
    let mut draft = NoteDraft::new(title, description);
    if let Some(image) = image {
        draft = draft.with_image(image);
    }

    let engine = ctx.offline_engine()?;
    let result = engine.add_note(draft);
    engine.shutdown().await;

    let note = result?;
    println!("Added {}: {}", note.id, note.title);
    Ok(())
}
