// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Find-or-create protocol.
//!
//! Every entity with a natural key is written through [`ensure`]: the lookup
//! runs first and creation only happens when it comes back empty. Repeated
//! runs against the same tracker state therefore create nothing new.

/// Outcome of [`ensure`], tagged with whether the entity was new.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ensured<T> {
    Created(T),
    Found(T),
}

impl<T> Ensured<T> {
    pub fn was_created(&self) -> bool {
        matches!(self, Ensured::Created(_))
    }

    pub fn get(&self) -> &T {
        match self {
            Ensured::Created(value) | Ensured::Found(value) => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Ensured::Created(value) | Ensured::Found(value) => value,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Ensured<U> {
        match self {
            Ensured::Created(value) => Ensured::Created(f(value)),
            Ensured::Found(value) => Ensured::Found(f(value)),
        }
    }

    /// `"created"` or `"exists"`, as used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Ensured::Created(_) => "created",
            Ensured::Found(_) => "exists",
        }
    }
}

/// Looks `state` up with `lookup` and falls back to `create` when absent.
///
/// Errors from either step are returned unchanged; `create` is never called
/// after a failed lookup.
pub fn ensure<S, T, E>(
    state: &mut S,
    lookup: impl FnOnce(&mut S) -> Result<Option<T>, E>,
    create: impl FnOnce(&mut S) -> Result<T, E>,
) -> Result<Ensured<T>, E> {
    if let Some(found) = lookup(state)? {
        return Ok(Ensured::Found(found));
    }
    create(state).map(Ensured::Created)
}
