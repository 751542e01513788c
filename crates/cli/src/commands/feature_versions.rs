// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Spreads unversioned Features across the upcoming releases.

use jseed_core::{unreleased_versions, HierarchyLevel};
use tracing::{error, info};

use super::Context;
use crate::error::Result;
use crate::gateway::Transport;

/// Upper bound on Features fetched per project.
pub const MAX_FEATURES: u32 = 500;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FeatureVersionReport {
    pub updated: usize,
    pub errors: usize,
    /// Features updated per project, in seed order.
    pub projects: Vec<(String, usize)>,
}

pub fn unversioned_features_jql(project: &str) -> String {
    format!(
        "project = {} AND issuetype = \"{}\" AND fixVersion is EMPTY",
        project,
        HierarchyLevel::Feature
    )
}

pub fn run<T: Transport>(ctx: &mut Context<T>, report: &mut FeatureVersionReport) -> Result<()> {
    let versions = unreleased_versions();
    for project in &ctx.seed.projects {
        ctx.cancel.check()?;
        let jql = unversioned_features_jql(&project.key);
        let page = match ctx.gateway.search(&jql, "summary", MAX_FEATURES, 0) {
            Ok(page) => page,
            Err(e) => {
                error!(project = %project.key, error = %e, "failed to search features");
                report.errors += 1;
                report.projects.push((project.key.clone(), 0));
                continue;
            }
        };

        let mut updated = 0;
        for (feature, version) in page.issues.iter().zip(versions.iter().cycle()) {
            ctx.cancel.check()?;
            match ctx.gateway.set_fix_version(&feature.key, version) {
                Ok(()) => updated += 1,
                Err(e) => {
                    error!(key = %feature.key, version, error = %e, "failed to set fix version");
                    report.errors += 1;
                }
            }
        }
        info!(project = %project.key, updated, "assigned fix versions");
        report.updated += updated;
        report.projects.push((project.key.clone(), updated));
    }
    Ok(())
}

#[cfg(test)]
#[path = "feature_versions_tests.rs"]
mod tests;
