// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::gateway::GatewayError;

/// All possible errors that can occur in the jseedrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("missing setting: {var} is not set\n  hint: export {var}=... or set `{key}` under [jira] in jseed.toml")]
    MissingSetting {
        var: &'static str,
        key: &'static str,
    },

    #[error("jira error: {0}")]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Core(#[from] jseed_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("interrupted by user")]
    Interrupted,

    #[error("cannot install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("confirmation required to {action}\n  hint: run in a terminal, or pass --force to skip the prompt")]
    ConfirmationRequired { action: String },

    #[error("{failed} of {total} project(s) could not be onboarded")]
    OnboardFailed { failed: usize, total: usize },
}

/// A specialized Result type for jseedrs operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Interrupted => 130,
            _ => 1,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
