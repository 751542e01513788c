// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = std::env::var("OUT_DIR")?;
    let path = std::path::Path::new(&out_dir).join("env_vars.rs");
    let mut f = std::fs::File::create(path)?;

    let vars = [
        ("JSEED_TIMINGS", "JSEED_TIMINGS"),
        ("JSEED_CONFIG", "JSEED_CONFIG"),
        ("NO_COLOR", "NO_COLOR"),
        ("COLOR", "COLOR"),
        ("JIRA_URL", "JIRA_URL"),
        ("JIRA_USER", "JIRA_USER"),
        ("JIRA_TOKEN", "JIRA_TOKEN"),
        ("JIRA_VERIFY_SSL", "JIRA_VERIFY_SSL"),
        ("JIRA_PARENT_LINK_FIELD", "JIRA_PARENT_LINK_FIELD"),
        ("JIRA_DEFAULT_SCREEN_ID", "JIRA_DEFAULT_SCREEN_ID"),
        ("JIRA_CONSTRAINT_LABELS", "JIRA_CONSTRAINT_LABELS"),
    ];

    for (const_name, env_name) in &vars {
        writeln!(f, "pub const {const_name}: &str = \"{env_name}\";")?;
    }

    Ok(())
}
