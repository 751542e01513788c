// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text generation with colorization support.

use crate::colors;
use clap::builder::styling::Styles;

/// Clap styles matching the colors used in the command list.
pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }

    use anstyle::{Ansi256Color, Color, Style};

    let fg = |code| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))));
    let header = fg(colors::codes::HEADER);
    let context = fg(colors::codes::CONTEXT);

    Styles::styled()
        .header(header)
        .usage(header)
        .literal(fg(colors::codes::LITERAL))
        .placeholder(context)
        .valid(context)
}

/// Main help template with colorized Options header.
pub fn template() -> String {
    format!(
        "{{about-with-newline}}
{{usage-heading}} {{usage}}

{{before-help}}{}
{{options}}{{after-help}}",
        colors::header("Options:")
    )
}

/// Commands list shown before options in main help.
pub fn commands() -> String {
    format!(
        "\
{header_seed}
  {setup}       Create projects, types, fields, hierarchy and constraints
  {rebuild}     Delete all issues, then run every setup phase
  {onboard}     Add constraint fields to a project's screens

{header_teardown}
  {teardown}    Delete seeded issues (and optionally projects)

{header_utility}
  {check}       Test the connection to Jira
  {show_config} Show configuration and seed data summary
  {completion}  Generate shell completions
",
        header_seed = colors::header("Seeding:"),
        header_teardown = colors::header("Cleanup:"),
        header_utility = colors::header("Utility:"),
        setup = colors::literal("setup"),
        rebuild = colors::literal("rebuild"),
        onboard = colors::literal("onboard"),
        teardown = colors::literal("teardown"),
        check = colors::literal("check"),
        show_config = colors::literal("show-config"),
        completion = colors::literal("completion"),
    )
}

/// Quickstart help shown after options in main help.
pub fn quickstart() -> String {
    colors::examples(
        "\
Get started:
  jseed check                    Verify URL and token
  jseed setup --dry-run          Preview everything setup would create
  jseed setup                    Run every phase in order
  jseed setup hierarchy          Run a single phase
  jseed teardown --projects -f   Delete issues and projects without asking",
    )
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
