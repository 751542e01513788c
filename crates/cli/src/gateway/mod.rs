// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote issue-tracker gateway.
//!
//! Typed, cached access to the Jira Data Center REST API (v2).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Phases    │────►│   Gateway   │────►│  Transport  │────► Jira
//! │ (commands)  │◄────│  (ensure)   │◄────│   (trait)   │◄────
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! - Natural-key lookups before every create ([`ensure`])
//! - Per-run caches for issue types, fields, link types and projects
//! - Preview mode that never sends a mutating request
//! - Injectable transport for testing

mod client;
mod ensure;
mod transport;

pub use client::{summary_jql, Gateway, GatewayError, GatewayResult, ScreenAttach, SearchPage};
pub use ensure::{ensure, Ensured};
pub use transport::{HttpTransport, Method, Request, Response, Transport, TransportError};

#[cfg(test)]
pub(crate) mod test_helpers;


#[cfg(test)]
mod ensure_tests;
