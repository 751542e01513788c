// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use jseed_core::{VersionSpec, VERSIONS};
use tracing::{debug, error};

use super::{Context, Tally};
use crate::error::Result;
use crate::gateway::Transport;

/// Ensures the fixed release versions in every seed project.
pub fn run<T: Transport>(ctx: &mut Context<T>, report: &mut Tally) -> Result<()> {
    for project in &ctx.seed.projects {
        for version in &VERSIONS {
            ctx.cancel.check()?;
            let spec = VersionSpec {
                project: project.key.clone(),
                name: version.name.to_string(),
                description: version.description.to_string(),
                released: version.released,
                start_date: None,
                release_date: None,
            };
            match ctx.gateway.ensure_version(&spec) {
                Ok(ensured) => {
                    debug!(
                        project = %project.key,
                        version = version.name,
                        "version {}",
                        ensured.label()
                    );
                    report.record(&ensured);
                }
                Err(e) => {
                    error!(
                        project = %project.key,
                        version = version.name,
                        error = %e,
                        "failed to ensure version"
                    );
                    report.fail();
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "versions_tests.rs"]
mod tests;
