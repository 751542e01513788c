// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Deletes seeded issues, and optionally the projects, from Jira.

use tracing::{error, info};

use super::Context;
use crate::error::Result;
use crate::gateway::{Gateway, Transport};
use crate::interrupt::Cancel;

/// Issues fetched and deleted per page.
pub const BATCH: u32 = 50;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProjectCleanup {
    pub key: String,
    pub deleted: usize,
    pub failed: usize,
    /// `Some(true)` once the project itself is deleted.
    pub project_deleted: Option<bool>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TeardownReport {
    pub projects: Vec<ProjectCleanup>,
    /// Seed projects Jira does not have.
    pub missing: Vec<String>,
    pub errors: usize,
}

impl TeardownReport {
    pub fn issues_deleted(&self) -> usize {
        self.projects.iter().map(|p| p.deleted).sum()
    }

    pub fn issues_failed(&self) -> usize {
        self.projects.iter().map(|p| p.failed).sum()
    }

    pub fn projects_deleted(&self) -> usize {
        self.projects
            .iter()
            .filter(|p| p.project_deleted == Some(true))
            .count()
    }

    pub fn projects_failed(&self) -> usize {
        self.projects
            .iter()
            .filter(|p| p.project_deleted == Some(false))
            .count()
    }
}

pub fn run<T: Transport>(
    ctx: &mut Context<T>,
    delete_projects: bool,
    report: &mut TeardownReport,
) -> Result<()> {
    for project in &ctx.seed.projects {
        ctx.cancel.check()?;
        match ctx.gateway.project(&project.key) {
            Ok(Some(_)) => {}
            Ok(None) => {
                info!(key = %project.key, "project does not exist, skipping");
                report.missing.push(project.key.clone());
                continue;
            }
            Err(e) => {
                error!(key = %project.key, error = %e, "failed to look up project");
                report.errors += 1;
                continue;
            }
        }

        report.projects.push(ProjectCleanup {
            key: project.key.clone(),
            ..Default::default()
        });
        let Some(cleanup) = report.projects.last_mut() else {
            continue;
        };
        delete_issues(&mut ctx.gateway, &ctx.cancel, cleanup)?;
        info!(key = %cleanup.key, deleted = cleanup.deleted, failed = cleanup.failed, "cleaned project");

        if delete_projects {
            ctx.cancel.check()?;
            let deleted = match ctx.gateway.delete_project(&cleanup.key) {
                Ok(()) => true,
                Err(e) => {
                    error!(key = %cleanup.key, error = %e, "failed to delete project");
                    false
                }
            };
            cleanup.project_deleted = Some(deleted);
        }
    }
    Ok(())
}

/// Deletes every issue of a project, a page at a time.
///
/// Deleted issues drop out of the search, so the next page starts after
/// the issues still present: all of them in preview, the failures
/// otherwise.
fn delete_issues<T: Transport>(
    gateway: &mut Gateway<T>,
    cancel: &Cancel,
    cleanup: &mut ProjectCleanup,
) -> Result<()> {
    let jql = format!("project = {} ORDER BY created DESC", cleanup.key);
    let mut start_at = 0u64;
    loop {
        cancel.check()?;
        let page = match gateway.search(&jql, "summary", BATCH, start_at) {
            Ok(page) => page,
            Err(e) => {
                error!(key = %cleanup.key, error = %e, "failed to search issues");
                // Unsearched issues are left behind; count the page as one failure.
                cleanup.failed += 1;
                return Ok(());
            }
        };
        if page.issues.is_empty() {
            return Ok(());
        }

        let mut remaining = 0u64;
        for issue in &page.issues {
            cancel.check()?;
            match gateway.delete_issue(&issue.key) {
                Ok(()) => {
                    cleanup.deleted += 1;
                    if gateway.is_preview() {
                        remaining += 1;
                    }
                }
                Err(e) => {
                    error!(key = %issue.key, error = %e, "failed to delete issue");
                    cleanup.failed += 1;
                    remaining += 1;
                }
            }
        }

        if page.issues.len() < BATCH as usize {
            return Ok(());
        }
        start_at += remaining;
    }
}

#[cfg(test)]
#[path = "teardown_tests.rs"]
mod tests;
