// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use jseed_core::CurrentUser;
use tracing::debug;

use crate::error::Result;
use crate::gateway::{Gateway, Transport};

/// Verifies URL and token by fetching the current user.
pub fn check<T: Transport>(gateway: &mut Gateway<T>) -> Result<CurrentUser> {
    let user = gateway.myself()?;
    debug!(user = %user.name, "connected");
    Ok(user)
}

#[cfg(test)]
#[path = "connection_tests.rs"]
mod tests;
