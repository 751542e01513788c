// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue types phase.
//!
//! Only "Constraint" is created. The hierarchy types and the Constraint
//! workflow statuses come from Jira configuration (Advanced Roadmaps and a
//! workflow scheme) and are only verified here.

use jseed_core::{hierarchy_type_names, ConstraintStatus, IssueTypeSpec};
use tracing::{debug, error, warn};

use super::{Context, Tally};
use crate::error::Result;
use crate::gateway::Transport;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IssueTypeReport {
    /// The Constraint type.
    pub constraint: Tally,
    /// Hierarchy types found in Jira.
    pub verified: Vec<String>,
    /// Hierarchy types Jira does not have.
    pub missing: Vec<String>,
    /// Constraint workflow statuses Jira does not have.
    pub missing_statuses: Vec<String>,
    /// Verification reads that failed.
    pub lookup_errors: usize,
}

pub fn run<T: Transport>(ctx: &mut Context<T>, report: &mut IssueTypeReport) -> Result<()> {
    ctx.cancel.check()?;
    match ctx.gateway.ensure_issue_type(&IssueTypeSpec::constraint()) {
        Ok(ensured) => {
            debug!("constraint issue type {}", ensured.label());
            report.constraint.record(&ensured);
        }
        Err(e) => {
            error!(error = %e, "failed to ensure constraint issue type");
            report.constraint.fail();
        }
    }

    ctx.cancel.check()?;
    match ctx.gateway.issue_types() {
        Ok(types) => {
            for name in hierarchy_type_names() {
                if types.iter().any(|t| t.name == name) {
                    report.verified.push(name.to_string());
                } else {
                    warn!(issue_type = name, "hierarchy issue type missing");
                    report.missing.push(name.to_string());
                }
            }
        }
        Err(e) => {
            error!(error = %e, "failed to list issue types");
            report.lookup_errors += 1;
        }
    }

    ctx.cancel.check()?;
    match ctx.gateway.statuses() {
        Ok(statuses) => {
            for status in ConstraintStatus::ALL {
                if !statuses.iter().any(|s| s.name == status.as_str()) {
                    warn!(status = status.as_str(), "workflow status missing");
                    report.missing_statuses.push(status.as_str().to_string());
                }
            }
        }
        Err(e) => {
            error!(error = %e, "failed to list statuses");
            report.lookup_errors += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "issue_types_tests.rs"]
mod tests;
