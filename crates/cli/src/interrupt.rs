// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ctrl-C handling.
//!
//! The handler only raises a flag. Phases poll it between nodes and records
//! and return [`Error::Interrupted`]; remote changes already made stay.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::warn;

use crate::error::{Error, Result};

/// Shared cancellation flag.
#[derive(Clone, Debug, Default)]
pub struct Cancel {
    flag: Arc<AtomicBool>,
}

impl Cancel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a flag raised by Ctrl-C. Can only be called once per process.
    pub fn install() -> Result<Self> {
        let cancel = Cancel::new();
        let handle = cancel.clone();
        ctrlc::set_handler(move || {
            warn!("interrupt received, stopping after the current step");
            handle.cancel();
        })?;
        Ok(cancel)
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// `Err(Interrupted)` once the flag is raised.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(Error::Interrupted);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "interrupt_tests.rs"]
mod tests;
