// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::Result;

use super::Context;

pub async fn run(ctx: &Context, id: &str) -> Result<()> {
    let engine = ctx.offline_engine()?;
    let result = engine.delete_note(id);
    engine.shutdown().await;

    result?;
    println!("Deleted {}", id);
    Ok(())
}
