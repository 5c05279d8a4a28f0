// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashSet;
use yare::parameterized;

#[test]
fn test_generate_temp_id_format() {
    let id = generate_temp_id();
    assert!(id.starts_with("temp-"));
    assert_eq!(id.len(), 21); // temp- + 16 hex chars
    assert!(id[5..].chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_generate_temp_id_is_unique() {
    let ids: HashSet<String> = (0..1000).map(|_| generate_temp_id()).collect();
    assert_eq!(ids.len(), 1000);
}

#[parameterized(
    temp = { "temp-0123456789abcdef", true },
    bare_prefix = { "temp-", true },
    mongo_id = { "665f1c2ab2d4e8f9a0b1c2d3", false },
    prefix_inside = { "x-temp-1", false },
    empty = { "", false },
)]
fn test_is_temp_id(id: &str, expected: bool) {
    assert_eq!(is_temp_id(id), expected);
}
