// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// Every variable that feeds the configuration.
const SETTING_VARS: [&str; 8] = [
    "JIRA_URL",
    "JIRA_USER",
    "JIRA_TOKEN",
    "JIRA_VERIFY_SSL",
    "JIRA_PARENT_LINK_FIELD",
    "JIRA_DEFAULT_SCREEN_ID",
    "JIRA_CONSTRAINT_LABELS",
    "JSEED_CONFIG",
];

/// `jseed` isolated from the caller's settings: no setting variables, and
/// a home and working directory in `temp` so no config file is found.
pub fn jseed(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("jseed");
    for var in SETTING_VARS {
        cmd.env_remove(var);
    }
    cmd.env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .current_dir(temp.path());
    cmd
}

/// Writes a `[jira]` config file into `dir` and returns its path.
pub fn write_config(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("jseed.toml");
    std::fs::write(&path, format!("[jira]\n{}", body)).unwrap();
    path
}

/// Settings pointing at a port nothing listens on.
pub fn unreachable(cmd: &mut Command) -> &mut Command {
    cmd.env("JIRA_URL", "http://127.0.0.1:9")
        .env("JIRA_USER", "seed-admin")
        .env("JIRA_TOKEN", "not-a-real-token")
}
