// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Constraint builder.
//!
//! For each seed constraint:
//!
//! 1. Ensure the issue (in the project of the item it blocks).
//! 2. If it was just created, walk it from Identified to its seeded status.
//! 3. Find the blocked item by project, type and summary.
//! 4. Link constraint (outward) to item (inward) with "Blocks", unless an
//!    existing constraint already has that link.
//!
//! Select fields (Guild, Risk Materiality) are not set: their options have
//! to be configured by hand first. Only the Mitigation Plan text is sent.
//! Labels go out only when `constraint_labels` is on, since a create screen
//! without the Labels field rejects them.

use jseed_core::{
    ConstraintSeed, ConstraintStatus, Guild, IssueSpec, BLOCKS, CONSTRAINT_TYPE, MITIGATION_PLAN,
};
use tracing::{debug, error, info, warn};

use super::{Context, Tally};
use crate::error::Result;
use crate::gateway::{Gateway, Transport};

const CONSTRAINT_LABEL: &str = "constraint";

/// What happened to a constraint's Blocks link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Created,
    Existing,
    TargetNotFound,
    Failed,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LinkTally {
    pub created: usize,
    pub existing: usize,
    pub failed: usize,
}

/// A constraint the builder created or found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintItem {
    pub key: String,
    pub summary: String,
    pub guild: Guild,
    pub status: ConstraintStatus,
    /// `Type: summary` of the blocked item.
    pub blocks: String,
    pub link: LinkOutcome,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConstraintReport {
    pub constraints: Tally,
    pub links: LinkTally,
    /// Transitions executed.
    pub transitions: usize,
    /// Constraints left short of their seeded status.
    pub transition_failures: usize,
    pub items: Vec<ConstraintItem>,
}

/// The create request for a seed constraint.
pub fn constraint_spec(seed: &ConstraintSeed, labels: bool) -> IssueSpec {
    let spec = IssueSpec::new(&seed.blocks.project, CONSTRAINT_TYPE, &seed.summary)
        .with_description(Some(seed.description.as_str()))
        .with_custom_field(MITIGATION_PLAN, &seed.mitigation_plan);
    if !labels {
        return spec;
    }
    spec.with_label(CONSTRAINT_LABEL)
        .with_label(seed.guild.label())
}

pub fn run<T: Transport>(ctx: &mut Context<T>, report: &mut ConstraintReport) -> Result<()> {
    let labels = ctx.config.constraint_labels;
    for seed in &ctx.seed.constraints {
        ctx.cancel.check()?;

        let ensured = match ctx.gateway.ensure_issue(&constraint_spec(seed, labels)) {
            Ok(ensured) => ensured,
            Err(e) => {
                error!(summary = %seed.summary, error = %e, "failed to ensure constraint");
                report.constraints.fail();
                continue;
            }
        };
        report.constraints.record(&ensured);
        let created = ensured.was_created();
        let key = ensured.into_inner().key;
        debug!(key = %key, created, "constraint ready");

        if created {
            drive_to_status(&mut ctx.gateway, &key, seed.status, report);
        }
        let link = link_to_target(&mut ctx.gateway, &key, seed, !created, &mut report.links);

        report.items.push(ConstraintItem {
            key,
            summary: seed.summary.clone(),
            guild: seed.guild,
            status: seed.status,
            blocks: format!("{}: {}", seed.blocks.level, seed.blocks.summary),
            link,
        });
    }
    Ok(())
}

/// Executes the fixed transition path to `status`, stopping at the first
/// transition that is missing or fails.
fn drive_to_status<T: Transport>(
    gateway: &mut Gateway<T>,
    key: &str,
    status: ConstraintStatus,
    report: &mut ConstraintReport,
) {
    for &name in status.transition_path() {
        match gateway.execute_transition(key, name) {
            Ok(true) => report.transitions += 1,
            Ok(false) => {
                warn!(key, target = %status, "stopped short of seeded status");
                report.transition_failures += 1;
                return;
            }
            Err(e) => {
                warn!(key, transition = name, error = %e, "transition failed");
                report.transition_failures += 1;
                return;
            }
        }
    }
}

fn link_to_target<T: Transport>(
    gateway: &mut Gateway<T>,
    key: &str,
    seed: &ConstraintSeed,
    check_existing: bool,
    links: &mut LinkTally,
) -> LinkOutcome {
    let target = &seed.blocks;
    let level = Some(target.level.as_str());
    let found = match gateway.find_issue(&target.project, &target.summary, level) {
        Ok(Some(issue)) => issue,
        Ok(None) => {
            warn!(
                project = %target.project,
                issue_type = %target.level,
                summary = %target.summary,
                "link target not found"
            );
            links.failed += 1;
            return LinkOutcome::TargetNotFound;
        }
        Err(e) => {
            error!(summary = %target.summary, error = %e, "failed to look up link target");
            links.failed += 1;
            return LinkOutcome::Failed;
        }
    };

    if check_existing {
        match gateway.has_link(key, BLOCKS, &found.key) {
            Ok(true) => {
                debug!(key, target = %found.key, "link exists");
                links.existing += 1;
                return LinkOutcome::Existing;
            }
            Ok(false) => {}
            Err(e) => warn!(key, error = %e, "could not read existing links"),
        }
    }

    match gateway.create_link(BLOCKS, &found.key, key) {
        Ok(()) => {
            info!(key, target = %found.key, "constraint blocks target");
            links.created += 1;
            LinkOutcome::Created
        }
        Err(e) => {
            error!(key, target = %found.key, error = %e, "failed to link constraint");
            links.failed += 1;
            LinkOutcome::Failed
        }
    }
}

#[cfg(test)]
#[path = "constraints_tests.rs"]
mod tests;
