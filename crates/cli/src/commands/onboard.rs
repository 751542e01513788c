// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Onboarding: places the constraint fields on an existing project's
//! screens. A project's screens are the ones named `KEY: ...`.

use jseed_core::{constraint_fields, Screen};
use tracing::{info, warn};

use super::fields::{attach, ScreenTally};
use super::Context;
use crate::error::Result;
use crate::gateway::{Gateway, Transport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenResult {
    pub screen: Screen,
    pub fields: ScreenTally,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProjectOnboard {
    pub key: String,
    pub screens: Vec<ScreenResult>,
    pub errors: Vec<String>,
}

impl ProjectOnboard {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields_added(&self) -> usize {
        self.screens.iter().map(|s| s.fields.added).sum()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OnboardReport {
    pub projects: Vec<ProjectOnboard>,
}

impl OnboardReport {
    pub fn failed(&self) -> usize {
        self.projects.iter().filter(|p| !p.is_ok()).count()
    }
}

pub fn run<T: Transport>(
    ctx: &mut Context<T>,
    keys: &[String],
    report: &mut OnboardReport,
) -> Result<()> {
    for key in keys {
        ctx.cancel.check()?;
        let key = key.trim().to_uppercase();
        let mut result = ProjectOnboard {
            key,
            ..Default::default()
        };
        onboard(&mut ctx.gateway, &mut result);
        for error in &result.errors {
            warn!(project = %result.key, "{}", error);
        }
        report.projects.push(result);
    }
    Ok(())
}

fn onboard<T: Transport>(gateway: &mut Gateway<T>, result: &mut ProjectOnboard) {
    match gateway.project(&result.key) {
        Ok(Some(_)) => {}
        Ok(None) => {
            result.errors.push(format!("project '{}' not found", result.key));
            return;
        }
        Err(e) => {
            result.errors.push(e.to_string());
            return;
        }
    }

    let mut field_ids = Vec::new();
    for spec in constraint_fields() {
        match gateway.custom_field(&spec.name) {
            Ok(Some(field)) => field_ids.push(field.id),
            Ok(None) => warn!(field = %spec.name, "custom field not found"),
            Err(e) => {
                result.errors.push(e.to_string());
                return;
            }
        }
    }
    if field_ids.is_empty() {
        result
            .errors
            .push("no constraint fields found, run `jseed setup fields` first".to_string());
        return;
    }

    let screens = match gateway.project_screens(&result.key) {
        Ok(screens) => screens,
        Err(e) => {
            result.errors.push(e.to_string());
            return;
        }
    };
    if screens.is_empty() {
        result.errors.push(format!(
            "no screens found, screens should be named like '{}: ...'",
            result.key
        ));
        return;
    }

    for screen in screens {
        let mut fields = ScreenTally::default();
        for id in &field_ids {
            attach(gateway, screen.id, id, &mut fields);
        }
        info!(project = %result.key, screen = %screen.name, added = fields.added, "onboarded screen");
        result.screens.push(ScreenResult { screen, fields });
    }
}

#[cfg(test)]
#[path = "onboard_tests.rs"]
mod tests;
