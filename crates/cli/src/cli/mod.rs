// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use crate::colors;
use crate::help;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// A setup phase. Declaration order is execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Phase {
    /// Create the seed projects
    Projects,
    /// Create the Constraint issue type, verify the hierarchy types
    IssueTypes,
    /// Create constraint custom fields and add them to the default screen
    Fields,
    /// Build the Strategic Objective to Feature hierarchy
    Hierarchy,
    /// Create release versions in every project
    Versions,
    /// Assign unversioned Features to upcoming releases
    FeatureVersions,
    /// Create constraints, their statuses and Blocks links
    Constraints,
}

impl Phase {
    pub const ALL: [Phase; 7] = [
        Phase::Projects,
        Phase::IssueTypes,
        Phase::Fields,
        Phase::Hierarchy,
        Phase::Versions,
        Phase::FeatureVersions,
        Phase::Constraints,
    ];

    /// The phases to run for a selection: all of them when empty,
    /// otherwise the selection in execution order without repeats.
    pub fn plan(selected: &[Phase]) -> Vec<Phase> {
        if selected.is_empty() {
            return Phase::ALL.to_vec();
        }
        let mut phases = selected.to_vec();
        phases.sort();
        phases.dedup();
        phases
    }

    /// Command-line name of the phase.
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Projects => "projects",
            Phase::IssueTypes => "issue-types",
            Phase::Fields => "fields",
            Phase::Hierarchy => "hierarchy",
            Phase::Versions => "versions",
            Phase::FeatureVersions => "feature-versions",
            Phase::Constraints => "constraints",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Phase::Projects => "Projects",
            Phase::IssueTypes => "Issue types",
            Phase::Fields => "Custom fields",
            Phase::Hierarchy => "Hierarchy",
            Phase::Versions => "Versions",
            Phase::FeatureVersions => "Feature versions",
            Phase::Constraints => "Constraints",
        }
    }
}

#[derive(Parser)]
#[command(name = "jseed")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Seed a Jira Data Center instance with governance demo data")]
#[command(
    long_about = "Seed a Jira Data Center instance with governance demo data.\n\n\
    Every phase looks issues up by project, type and summary before creating\n\
    them, so re-running a phase never creates duplicates."
)]
#[command(help_template = help::template())]
#[command(before_help = help::commands())]
#[command(after_help = help::quickstart())]
#[command(styles = help::styles())]
pub struct Cli {
    /// Show what would be created or deleted without changing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Skip confirmation prompts
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Log every request (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Read settings from this TOML file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run setup phases (all of them when none are given)
    #[command(after_help = colors::examples("\
Examples:
  jseed setup                          Run every phase
  jseed setup hierarchy constraints    Run two phases, in order
  jseed setup --dry-run                Preview without creating anything"))]
    Setup {
        /// Phases to run
        #[arg(value_enum)]
        phases: Vec<Phase>,
    },

    /// Delete every issue in the seed projects
    #[command(after_help = colors::examples("\
Examples:
  jseed teardown                 Delete issues after typing 'yes'
  jseed teardown --projects      Also delete the projects
  jseed teardown --dry-run       Count what would be deleted"))]
    Teardown {
        /// Also delete the projects themselves
        #[arg(long)]
        projects: bool,
    },

    /// Delete all issues, then run every setup phase
    Rebuild,

    /// Add the constraint custom fields to a project's screens
    #[command(arg_required_else_help = true)]
    #[command(after_help = colors::examples("\
Examples:
  jseed onboard PAY            Onboard one project
  jseed onboard pay mob        Keys are upper-cased"))]
    Onboard {
        /// Project keys
        #[arg(required = true, value_name = "PROJECT")]
        projects: Vec<String>,
    },

    /// Test the connection and credentials
    Check,

    /// Show resolved settings and a summary of the seed data
    ShowConfig,

    /// Generate shell completions
    #[command(arg_required_else_help = true)]
    #[command(after_help = colors::examples("\
Examples:
  jseed completion bash > ~/.local/share/bash-completion/completions/jseed
  jseed completion zsh > ~/.zfunc/_jseed"))]
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
