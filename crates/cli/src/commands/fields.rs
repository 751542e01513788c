// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Custom fields phase.
//!
//! Creates the constraint fields and places them on the default screen.
//! Select options are not created through the REST API; the report lists
//! them so they can be added by hand.

use jseed_core::{constraint_fields, FieldKind};
use tracing::{debug, error, warn};

use super::{Context, Tally};
use crate::error::Result;
use crate::gateway::{Gateway, ScreenAttach, Transport};

/// Screen placement counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScreenTally {
    pub added: usize,
    pub already_present: usize,
    pub errors: usize,
}

/// Adds `field_id` to the first tab of `screen`, counting the outcome.
pub fn attach<T: Transport>(
    gateway: &mut Gateway<T>,
    screen: i64,
    field_id: &str,
    tally: &mut ScreenTally,
) {
    match gateway.add_field_to_screen(screen, field_id) {
        Ok(ScreenAttach::Added) => tally.added += 1,
        Ok(ScreenAttach::AlreadyPresent) => tally.already_present += 1,
        Err(e) => {
            warn!(screen, field = field_id, error = %e, "failed to add field to screen");
            tally.errors += 1;
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldReport {
    pub fields: Tally,
    pub screen: ScreenTally,
    /// Select fields and the options to configure by hand.
    pub manual_options: Vec<(String, Vec<String>)>,
}

pub fn run<T: Transport>(ctx: &mut Context<T>, report: &mut FieldReport) -> Result<()> {
    let screen = ctx.config.default_screen_id;
    for spec in constraint_fields() {
        ctx.cancel.check()?;
        if spec.kind == FieldKind::Select {
            report
                .manual_options
                .push((spec.name.clone(), spec.options.clone()));
        }
        let field = match ctx.gateway.ensure_custom_field(&spec) {
            Ok(ensured) => {
                debug!(name = %spec.name, "custom field {}", ensured.label());
                report.fields.record(&ensured);
                ensured.into_inner()
            }
            Err(e) => {
                error!(name = %spec.name, error = %e, "failed to ensure custom field");
                report.fields.fail();
                continue;
            }
        };
        attach(&mut ctx.gateway, screen, &field.id, &mut report.screen);
    }
    Ok(())
}

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;
