// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for jseed-core operations.

use thiserror::Error;

/// All possible errors that can occur in jseed-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid status: '{0}'\n  hint: valid statuses are: Identified, In Progress, Ready for Review, Closed")]
    InvalidStatus(String),

    #[error("invalid hierarchy level: '{0}'\n  hint: valid levels are: Strategic Objective, Portfolio Epic, Business Outcome, Feature")]
    InvalidLevel(String),

    #[error("invalid field kind: '{0}'\n  hint: valid kinds are: select, textarea, text")]
    InvalidFieldKind(String),

    #[error("invalid issue type kind: '{0}'\n  hint: valid kinds are: standard, subtask")]
    InvalidIssueTypeKind(String),

    #[error("invalid seed data in {file}: {reason}")]
    InvalidSeed { file: &'static str, reason: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for jseed-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
