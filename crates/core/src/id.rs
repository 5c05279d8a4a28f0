// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Temporary note ids.
//!
//! Notes created locally get a `temp-` id until the server acknowledges the
//! create. Server ids never carry this prefix, so a temporary id can never
//! collide with a real one.

/// Prefix reserved for locally generated ids.
pub const TEMP_ID_PREFIX: &str = "temp-";

/// Generate a fresh temporary id.
/// Format: temp-{hex} where hex is 16 chars from the thread-local CSPRNG.
pub fn generate_temp_id() -> String {
    let bytes: [u8; 8] = rand::random();
    format!("{}{}", TEMP_ID_PREFIX, hex::encode(bytes))
}

/// Returns true if `id` was generated locally and not yet acknowledged.
pub fn is_temp_id(id: &str) -> bool {
    id.starts_with(TEMP_ID_PREFIX)
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
