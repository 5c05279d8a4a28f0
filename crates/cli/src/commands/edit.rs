// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use quill_core::NotePatch;

use crate::error::Result;

use super::Context;

pub async fn run(
    ctx: &Context,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
) -> Result<()> {
    let patch = NotePatch {
        title,
        description,
        image_uri: image,
    };

    let engine = ctx.offline_engine()?;
    let result = engine.update_note(id, patch);
    engine.shutdown().await;

    result?;
    println!("Updated {}", id);
    Ok(())
}
