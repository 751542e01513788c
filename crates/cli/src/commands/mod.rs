// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Setup phases, teardown and onboarding.
//!
//! Each phase takes a [`Context`] and fills a report. Reports are filled
//! in place so a phase stopped by an error or an interrupt still has a
//! summary to print.

pub mod connection;
pub mod constraints;
pub mod feature_versions;
pub mod fields;
pub mod hierarchy;
pub mod issue_types;
pub mod onboard;
pub mod projects;
pub mod teardown;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
pub mod versions;

use jseed_core::SeedData;

use crate::config::Config;
use crate::gateway::{Ensured, Gateway, HttpTransport, Transport};
use crate::interrupt::Cancel;

/// Everything a phase needs for one run.
pub struct Context<T: Transport = HttpTransport> {
    pub gateway: Gateway<T>,
    pub seed: SeedData,
    pub config: Config,
    pub cancel: Cancel,
}

impl<T: Transport> Context<T> {
    pub fn new(gateway: Gateway<T>, seed: SeedData, config: Config, cancel: Cancel) -> Self {
        Context {
            gateway,
            seed,
            config,
            cancel,
        }
    }

    pub fn is_preview(&self) -> bool {
        self.gateway.is_preview()
    }
}

/// Created / existing / failed counts for one kind of entity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub created: usize,
    pub existing: usize,
    pub errors: usize,
}

impl Tally {
    pub fn record<T>(&mut self, ensured: &Ensured<T>) {
        if ensured.was_created() {
            self.created += 1;
        } else {
            self.existing += 1;
        }
    }

    pub fn fail(&mut self) {
        self.errors += 1;
    }

    pub fn total(&self) -> usize {
        self.created + self.existing + self.errors
    }

    pub fn add(&mut self, other: Tally) {
        self.created += other.created;
        self.existing += other.existing;
        self.errors += other.errors;
    }
}
