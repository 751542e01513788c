// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! jseedrs - seeds a Jira Data Center instance with governance demo data.
//!
//! This crate provides the `jseed` CLI: a fixed dataset of projects, a
//! four-level portfolio hierarchy, versions and Constraint issues linked to
//! the items they block.
//!
//! # Main Components
//!
//! - [`Cli`] - Command-line surface and the setup [`Phase`]s
//! - [`config`] - Connection settings from `jseed.toml` and the environment
//! - [`Error`] - Error types for all operations
//!
//! Every phase looks its records up by natural key before creating them,
//! so any command can be re-run against the same instance.
//!
//! ```rust,ignore
//! use clap::Parser;
//! use jseedrs::{Cancel, Cli};
//!
//! let cli = Cli::parse_from(["jseed", "--dry-run", "setup", "hierarchy"]);
//! jseedrs::run(cli, Cancel::new())?;
//! ```

mod cli;
pub mod colors;
mod commands;
mod completions;
pub mod config;
mod display;
mod env;
pub mod error;
mod gateway;
pub mod help;
mod interrupt;
pub mod timings;

pub use cli::{Cli, Command, Phase};
pub use error::{Error, Result};
pub use interrupt::Cancel;

use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;

use jseed_core::SeedData;
use tracing::info;

use commands::constraints::ConstraintReport;
use commands::feature_versions::FeatureVersionReport;
use commands::fields::FieldReport;
use commands::hierarchy::HierarchyReport;
use commands::issue_types::IssueTypeReport;
use commands::onboard::OnboardReport;
use commands::teardown::TeardownReport;
use commands::{Context, Tally};
use gateway::{Gateway, Transport};

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(cli: Cli, cancel: Cancel) -> Result<()> {
    let Cli {
        dry_run,
        force,
        config: config_path,
        command,
        ..
    } = cli;

    match command {
        Command::Completion { shell } => return completions::print(shell),
        Command::ShowConfig => return show_config(config_path.as_deref()),
        _ => {}
    }

    let (settings, _) = config::load_settings(config_path.as_deref())?;
    let config = settings.resolve()?;
    let seed = SeedData::embedded()?;
    let gateway = Gateway::new(&config, dry_run);
    let mut ctx = Context::new(gateway, seed, config, cancel);

    if dry_run {
        println!("Dry run: lookups only, nothing will be changed.");
    }
    let user = commands::connection::check(&mut ctx.gateway)?;
    println!("{}", display::format_connected(&user));

    match command {
        Command::Setup { phases } => setup(&mut ctx, &Phase::plan(&phases)),
        Command::Teardown { projects } => teardown(&mut ctx, projects, force).map(|_| ()),
        Command::Rebuild => {
            if teardown(&mut ctx, false, force)? {
                setup(&mut ctx, &Phase::ALL)?;
            }
            Ok(())
        }
        Command::Onboard { projects } => onboard(&mut ctx, &projects),
        Command::Check | Command::ShowConfig | Command::Completion { .. } => Ok(()),
    }
}

fn show_config(path: Option<&Path>) -> Result<()> {
    let (settings, file) = config::load_settings(path)?;
    println!("{}", display::format_config(&settings, file.as_deref()));
    let seed = SeedData::embedded()?;
    println!();
    println!("{}", display::format_seed_summary(&seed));
    Ok(())
}

/// Runs `phases` in order. A phase's summary is printed even when it
/// stops early; its error then ends the run.
fn setup<T: Transport>(ctx: &mut Context<T>, phases: &[Phase]) -> Result<()> {
    for &phase in phases {
        info!(phase = phase.name(), "starting {}", phase.title());
        println!();
        let timing = format!("setup::{}", phase.name());
        time_phase!(&timing, run_phase(ctx, phase))?;
    }
    Ok(())
}

fn run_phase<T: Transport>(ctx: &mut Context<T>, phase: Phase) -> Result<()> {
    match phase {
        Phase::Projects => summarize::<T, Tally>(
            ctx,
            commands::projects::run,
            display::format_projects,
        ),
        Phase::IssueTypes => summarize::<T, IssueTypeReport>(
            ctx,
            commands::issue_types::run,
            display::format_issue_types,
        ),
        Phase::Fields => {
            summarize::<T, FieldReport>(ctx, commands::fields::run, display::format_fields)
        }
        Phase::Hierarchy => summarize::<T, HierarchyReport>(
            ctx,
            commands::hierarchy::run,
            display::format_hierarchy,
        ),
        Phase::Versions => summarize::<T, Tally>(
            ctx,
            commands::versions::run,
            display::format_versions,
        ),
        Phase::FeatureVersions => summarize::<T, FeatureVersionReport>(
            ctx,
            commands::feature_versions::run,
            display::format_feature_versions,
        ),
        Phase::Constraints => summarize::<T, ConstraintReport>(
            ctx,
            commands::constraints::run,
            display::format_constraints,
        ),
    }
}

fn summarize<T: Transport, R: Default>(
    ctx: &mut Context<T>,
    phase: fn(&mut Context<T>, &mut R) -> Result<()>,
    format: fn(&R) -> String,
) -> Result<()> {
    let mut report = R::default();
    let result = phase(ctx, &mut report);
    println!("{}", format(&report));
    result
}

/// Returns `false` when the user declined.
fn teardown<T: Transport>(
    ctx: &mut Context<T>,
    delete_projects: bool,
    force: bool,
) -> Result<bool> {
    if !force && !ctx.is_preview() {
        let keys: Vec<_> = ctx.seed.projects.iter().map(|p| p.key.as_str()).collect();
        let issues = format!("delete every issue in {}", keys.join(", "));
        if !confirm(&issues, "yes", &ctx.cancel)? {
            println!("Aborted.");
            return Ok(false);
        }
        if delete_projects && !confirm("delete the projects themselves", "DELETE", &ctx.cancel)? {
            println!("Aborted.");
            return Ok(false);
        }
    }

    println!();
    let mut report = TeardownReport::default();
    let result = time_phase!(
        "teardown",
        commands::teardown::run(ctx, delete_projects, &mut report)
    );
    println!("{}", display::format_teardown(&report, delete_projects));
    result.map(|()| true)
}

fn onboard<T: Transport>(ctx: &mut Context<T>, projects: &[String]) -> Result<()> {
    println!();
    let mut report = OnboardReport::default();
    let result = time_phase!(
        "onboard",
        commands::onboard::run(ctx, projects, &mut report)
    );
    println!("{}", display::format_onboard(&report));
    result?;

    let failed = report.failed();
    if failed > 0 {
        return Err(Error::OnboardFailed {
            failed,
            total: report.projects.len(),
        });
    }
    Ok(())
}

/// Asks the user to type `word` before a destructive `action`.
fn confirm(action: &str, word: &str, cancel: &Cancel) -> Result<bool> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        return Err(Error::ConfirmationRequired {
            action: action.to_string(),
        });
    }
    print!("This will {}.\nType '{}' to continue: ", action, word);
    std::io::stdout().flush()?;
    read_answer(&mut stdin.lock(), word, cancel)
}

/// Reads one line of confirmation. End of input declines; an interrupt
/// raised while waiting wins over whatever was typed.
fn read_answer(reader: &mut impl BufRead, word: &str, cancel: &Cancel) -> Result<bool> {
    let mut answer = String::new();
    let read = reader.read_line(&mut answer)?;
    cancel.check()?;
    if read == 0 {
        return Ok(false);
    }
    Ok(accepts(&answer, word))
}

/// `yes` in any case; other words must match exactly.
fn accepts(answer: &str, word: &str) -> bool {
    let answer = answer.trim();
    if word == "yes" {
        return answer.eq_ignore_ascii_case(word);
    }
    answer == word
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
