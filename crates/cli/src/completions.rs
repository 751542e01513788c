// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shell completion scripts for jseed.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::error::Result;

/// Binary name the scripts complete.
const BIN_NAME: &str = "jseed";

/// Writes the completion script for `shell` to `out`.
pub fn write_script(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, out);
    out.flush()?;
    Ok(())
}

/// Prints the completion script for `shell` to stdout.
pub fn print(shell: Shell) -> Result<()> {
    write_script(shell, &mut std::io::stdout().lock())
}

#[cfg(test)]
#[path = "completions_tests.rs"]
mod tests;
