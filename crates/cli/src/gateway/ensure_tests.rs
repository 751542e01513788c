// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::ensure::{ensure, Ensured};
use std::collections::HashMap;

#[derive(Default)]
struct Store {
    items: HashMap<String, u32>,
    creates: usize,
}

fn ensure_item(store: &mut Store, name: &str) -> Result<Ensured<u32>, String> {
    ensure(
        store,
        |s| Ok(s.items.get(name).copied()),
        |s| {
            s.creates += 1;
            let id = s.items.len() as u32 + 1;
            s.items.insert(name.to_string(), id);
            Ok(id)
        },
    )
}

#[test]
fn creates_when_absent_and_finds_afterwards() {
    let mut store = Store::default();

    let first = ensure_item(&mut store, "v1.0.0").unwrap();
    assert_eq!(first, Ensured::Created(1));

    let second = ensure_item(&mut store, "v1.0.0").unwrap();
    assert_eq!(second, Ensured::Found(1));
    assert_eq!(store.creates, 1);
}

#[test]
fn failed_lookup_never_creates() {
    let mut store = Store::default();
    let result: Result<Ensured<u32>, String> = ensure(
        &mut store,
        |_| Err("lookup failed".to_string()),
        |s| {
            s.creates += 1;
            Ok(1)
        },
    );
    assert_eq!(result.unwrap_err(), "lookup failed");
    assert_eq!(store.creates, 0);
}

#[test]
fn create_error_is_returned() {
    let mut store = Store::default();
    let result: Result<Ensured<u32>, String> =
        ensure(&mut store, |_| Ok(None), |_| Err("HTTP 400".to_string()));
    assert_eq!(result.unwrap_err(), "HTTP 400");
}

#[test]
fn accessors() {
    let created = Ensured::Created("DEVEX-1".to_string());
    assert!(created.was_created());
    assert_eq!(created.get(), "DEVEX-1");
    assert_eq!(created.label(), "created");

    let found = Ensured::Found(7).map(|n| n * 2);
    assert!(!found.was_created());
    assert_eq!(found.label(), "exists");
    assert_eq!(found.into_inner(), 14);
}
