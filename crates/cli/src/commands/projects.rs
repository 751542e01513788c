// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use jseed_core::ProjectSpec;
use tracing::{debug, error};

use super::{Context, Tally};
use crate::error::Result;
use crate::gateway::Transport;

/// Ensures every seed project exists. Projects without a lead are led by
/// the configured user.
pub fn run<T: Transport>(ctx: &mut Context<T>, report: &mut Tally) -> Result<()> {
    for project in &ctx.seed.projects {
        ctx.cancel.check()?;
        let lead = project.lead.as_deref().unwrap_or(&ctx.config.username);
        let spec = ProjectSpec::software(&project.key, &project.name, &project.description, lead);
        match ctx.gateway.ensure_project(&spec) {
            Ok(ensured) => {
                debug!(key = %project.key, "project {}", ensured.label());
                report.record(&ensured);
            }
            Err(e) => {
                error!(key = %project.key, error = %e, "failed to ensure project");
                report.fail();
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "projects_tests.rs"]
mod tests;
