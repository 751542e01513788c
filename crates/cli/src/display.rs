// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! End-of-phase summaries and the `show-config` listing.
//!
//! Everything here returns plain text for stdout; logs go to stderr.

use std::path::Path;

use jseed_core::{CurrentUser, HierarchyLevel, SeedData, VERSIONS};

use crate::commands::constraints::{ConstraintReport, LinkOutcome};
use crate::commands::feature_versions::FeatureVersionReport;
use crate::commands::fields::{FieldReport, ScreenTally};
use crate::commands::hierarchy::HierarchyReport;
use crate::commands::issue_types::IssueTypeReport;
use crate::commands::onboard::OnboardReport;
use crate::commands::teardown::TeardownReport;
use crate::commands::Tally;
use crate::config::{mask_token, Settings, DEFAULT_PARENT_LINK_FIELD, DEFAULT_SCREEN_ID};

/// Summaries longer than this are cut with an ellipsis.
const SUMMARY_WIDTH: usize = 48;

/// Column at which per-row counts start.
const LABEL_WIDTH: usize = 22;

pub fn format_tally(tally: &Tally) -> String {
    format!(
        "{} created, {} existing, {} errors",
        tally.created, tally.existing, tally.errors
    )
}

fn format_screen_tally(tally: &ScreenTally) -> String {
    format!(
        "{} added, {} already present, {} errors",
        tally.added, tally.already_present, tally.errors
    )
}

fn row(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {:<width$}{}", label, value, width = LABEL_WIDTH)
}

/// Cuts `text` to `width` characters, ending in `...` when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

pub fn format_connected(user: &CurrentUser) -> String {
    format!("Connected as {}", user.label())
}

pub fn format_projects(tally: &Tally) -> String {
    format!("Projects: {}", format_tally(tally))
}

pub fn format_issue_types(report: &IssueTypeReport) -> String {
    let mut lines = vec![format!("Issue types: {}", format_tally(&report.constraint))];
    lines.push(row(
        "Hierarchy types:",
        format!("{} found", report.verified.len()),
    ));
    if !report.missing.is_empty() {
        lines.push(row("Missing types:", report.missing.join(", ")));
    }
    if !report.missing_statuses.is_empty() {
        lines.push(row("Missing statuses:", report.missing_statuses.join(", ")));
        lines.push("  Configure the Constraint workflow before running constraints.".to_string());
    }
    if report.lookup_errors > 0 {
        lines.push(row("Lookup errors:", report.lookup_errors));
    }
    lines.join("\n")
}

pub fn format_fields(report: &FieldReport) -> String {
    let mut lines = vec![format!("Custom fields: {}", format_tally(&report.fields))];
    lines.push(row("Default screen:", format_screen_tally(&report.screen)));
    if !report.manual_options.is_empty() {
        lines.push("  Manual step: add these options in Administration > Custom fields:".to_string());
        for (name, options) in &report.manual_options {
            lines.push(format!("    {}: {}", name, options.join(", ")));
        }
    }
    lines.join("\n")
}

pub fn format_hierarchy(report: &HierarchyReport) -> String {
    let mut lines = vec!["Hierarchy:".to_string()];
    for level in HierarchyLevel::ALL {
        lines.push(row(
            &format!("{}:", level.plural()),
            format_tally(&report.level(level)),
        ));
    }
    lines.push(row("Total:", format_tally(&report.total())));
    if report.skipped > 0 {
        lines.push(row("Skipped:", format!("{} (parent failed)", report.skipped)));
    }
    lines.join("\n")
}

pub fn format_versions(tally: &Tally) -> String {
    let names: Vec<_> = VERSIONS
        .iter()
        .map(|v| {
            if v.released {
                format!("{} (released)", v.name)
            } else {
                v.name.to_string()
            }
        })
        .collect();
    format!(
        "Versions: {}\n{}",
        format_tally(tally),
        row("Per project:", names.join(", "))
    )
}

pub fn format_feature_versions(report: &FeatureVersionReport) -> String {
    let mut lines = vec![format!(
        "Feature versions: {} updated, {} errors",
        report.updated, report.errors
    )];
    for (key, updated) in &report.projects {
        lines.push(row(&format!("{}:", key), format!("{} features", updated)));
    }
    lines.join("\n")
}

pub fn format_constraints(report: &ConstraintReport) -> String {
    let links = &report.links;
    let mut lines = vec![
        format!("Constraints: {}", format_tally(&report.constraints)),
        row(
            "Links:",
            format!(
                "{} created, {} existing, {} failed",
                links.created, links.existing, links.failed
            ),
        ),
        row(
            "Transitions:",
            format!(
                "{} executed, {} incomplete",
                report.transitions, report.transition_failures
            ),
        ),
    ];
    for item in &report.items {
        let marker = match item.link {
            LinkOutcome::Created | LinkOutcome::Existing => "blocks",
            LinkOutcome::TargetNotFound => "target not found:",
            LinkOutcome::Failed => "link failed:",
        };
        lines.push(format!(
            "    {} [{}] {} ({}) {} {}",
            item.key,
            item.guild,
            truncate(&item.summary, SUMMARY_WIDTH),
            item.status,
            marker,
            item.blocks
        ));
    }
    lines.join("\n")
}

pub fn format_teardown(report: &TeardownReport, delete_projects: bool) -> String {
    let mut lines = vec!["Teardown:".to_string()];
    for project in &report.projects {
        lines.push(row(
            &format!("{}:", project.key),
            format!("{} deleted, {} failed", project.deleted, project.failed),
        ));
    }
    lines.push(row(
        "Issues:",
        format!(
            "{} deleted, {} failed",
            report.issues_deleted(),
            report.issues_failed()
        ),
    ));
    if delete_projects {
        lines.push(row(
            "Projects:",
            format!(
                "{} deleted, {} failed",
                report.projects_deleted(),
                report.projects_failed()
            ),
        ));
    }
    if !report.missing.is_empty() {
        lines.push(row("Not found:", report.missing.join(", ")));
    }
    if report.errors > 0 {
        lines.push(row("Lookup errors:", report.errors));
    }
    lines.join("\n")
}

pub fn format_onboard(report: &OnboardReport) -> String {
    let mut lines = vec!["Onboarding:".to_string()];
    for project in &report.projects {
        lines.push(format!("  {}:", project.key));
        if !project.is_ok() {
            for error in &project.errors {
                lines.push(format!("    error: {}", error));
            }
            continue;
        }
        for screen in &project.screens {
            lines.push(format!(
                "    {}: {}",
                screen.screen.name,
                format_screen_tally(&screen.fields)
            ));
        }
    }
    let total = report.projects.len();
    lines.push(format!(
        "  {} of {} project(s) onboarded",
        total - report.failed(),
        total
    ));
    lines.join("\n")
}

/// Resolved settings, token masked. Missing values are shown, not
/// rejected.
pub fn format_config(settings: &Settings, path: Option<&Path>) -> String {
    let unset = || "(not set)".to_string();
    let file = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());
    [
        "Configuration:".to_string(),
        row("Config file:", file),
        row("Jira URL:", settings.base_url.clone().unwrap_or_else(unset)),
        row("Username:", settings.username.clone().unwrap_or_else(unset)),
        row("Token:", mask_token(settings.token.as_deref())),
        row("Verify TLS:", settings.verify_tls.unwrap_or(true)),
        row(
            "Parent link field:",
            settings
                .parent_link_field
                .as_deref()
                .unwrap_or(DEFAULT_PARENT_LINK_FIELD),
        ),
        row(
            "Default screen:",
            settings.default_screen_id.unwrap_or(DEFAULT_SCREEN_ID),
        ),
        row(
            "Constraint labels:",
            settings.constraint_labels.unwrap_or(false),
        ),
    ]
    .join("\n")
}

fn counts<K: std::fmt::Display>(entries: impl IntoIterator<Item = (K, usize)>) -> String {
    entries
        .into_iter()
        .map(|(k, n)| format!("{} {}", k, n))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_seed_summary(seed: &SeedData) -> String {
    let keys: Vec<_> = seed.projects.iter().map(|p| p.key.as_str()).collect();
    let mut lines = vec![
        "Seed data:".to_string(),
        row("Projects:", format!("{} ({})", keys.len(), keys.join(", "))),
    ];
    let levels = seed.level_counts();
    for level in HierarchyLevel::ALL {
        lines.push(row(
            &format!("{}:", level.plural()),
            levels.get(&level).copied().unwrap_or(0),
        ));
    }
    let constraints = seed.constraint_counts();
    lines.push(row("Constraints:", constraints.total));
    lines.push(row("  by guild:", counts(constraints.by_guild)));
    lines.push(row("  by status:", counts(constraints.by_status)));
    lines.push(row("  by materiality:", counts(constraints.by_materiality)));
    lines.join("\n")
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
