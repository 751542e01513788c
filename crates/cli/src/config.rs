// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connection settings.
//!
//! Settings come from an optional TOML file with a `[jira]` table, overlaid
//! by environment variables:
//! - `base_url` / `JIRA_URL`: Jira Data Center base URL (required)
//! - `username` / `JIRA_USER`: account name, also the default project lead (required)
//! - `token` / `JIRA_TOKEN`: personal access token (required)
//! - `verify_tls` / `JIRA_VERIFY_SSL`: TLS certificate verification (default true)
//! - `parent_link_field` / `JIRA_PARENT_LINK_FIELD`: parent-link custom field id
//! - `default_screen_id` / `JIRA_DEFAULT_SCREEN_ID`: screen that receives the constraint fields
//! - `constraint_labels` / `JIRA_CONSTRAINT_LABELS`: send labels with new constraints (default false,
//!   the Labels field is not on every create screen)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::env::{self, vars};
use crate::error::{Error, Result};

pub const DEFAULT_PARENT_LINK_FIELD: &str = "customfield_10108";
pub const DEFAULT_SCREEN_ID: i64 = 1;

const LOCAL_CONFIG_FILE: &str = "jseed.toml";
const CONFIG_DIR_NAME: &str = "jseed";
const CONFIG_FILE_NAME: &str = "config.toml";

/// On-disk layout of the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub jira: Settings,
}

/// Settings as given, before required values are checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_tls: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_link_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_screen_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_labels: Option<bool>,
}

/// Complete settings for a remote run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub username: String,
    pub token: String,
    pub verify_tls: bool,
    pub parent_link_field: String,
    pub default_screen_id: i64,
    pub constraint_labels: bool,
}

impl Settings {
    /// Reads settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let file: ConfigFile = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        Ok(file.jira)
    }

    /// Overlays values from `lookup` (the environment in production).
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = lookup(vars::JIRA_URL) {
            self.base_url = Some(url);
        }
        if let Some(user) = lookup(vars::JIRA_USER) {
            self.username = Some(user);
        }
        if let Some(token) = lookup(vars::JIRA_TOKEN) {
            self.token = Some(token);
        }
        if let Some(verify) = lookup(vars::JIRA_VERIFY_SSL) {
            self.verify_tls = Some(parse_bool(vars::JIRA_VERIFY_SSL, &verify)?);
        }
        if let Some(field) = lookup(vars::JIRA_PARENT_LINK_FIELD) {
            self.parent_link_field = Some(field);
        }
        if let Some(screen) = lookup(vars::JIRA_DEFAULT_SCREEN_ID) {
            let id = screen.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "{} must be a screen id, got '{}'",
                    vars::JIRA_DEFAULT_SCREEN_ID,
                    screen
                ))
            })?;
            self.default_screen_id = Some(id);
        }
        if let Some(labels) = lookup(vars::JIRA_CONSTRAINT_LABELS) {
            self.constraint_labels = Some(parse_bool(vars::JIRA_CONSTRAINT_LABELS, &labels)?);
        }
        Ok(self)
    }

    /// Checks required values and fills defaults.
    pub fn resolve(self) -> Result<Config> {
        let base_url = required(self.base_url, vars::JIRA_URL, "base_url")?;
        let username = required(self.username, vars::JIRA_USER, "username")?;
        let token = required(self.token, vars::JIRA_TOKEN, "token")?;
        Ok(Config {
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            token,
            verify_tls: self.verify_tls.unwrap_or(true),
            parent_link_field: self
                .parent_link_field
                .unwrap_or_else(|| DEFAULT_PARENT_LINK_FIELD.to_string()),
            default_screen_id: self.default_screen_id.unwrap_or(DEFAULT_SCREEN_ID),
            constraint_labels: self.constraint_labels.unwrap_or(false),
        })
    }
}

fn required(value: Option<String>, var: &'static str, key: &'static str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(Error::MissingSetting { var, key })
}

/// Parses a boolean setting (`true`/`false`, `1`/`0`, `yes`/`no`).
pub fn parse_bool(var: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(Error::Config(format!(
            "{} must be true or false, got '{}'",
            var, value
        ))),
    }
}

/// Token display for `show-config`: the first 8 characters only.
pub fn mask_token(token: Option<&str>) -> String {
    match token {
        None | Some("") => "(not set)".to_string(),
        Some(t) if t.chars().count() > 8 => {
            let head: String = t.chars().take(8).collect();
            format!("{}...", head)
        }
        Some(_) => "********".to_string(),
    }
}

/// Finds the config file to read.
///
/// An explicit path (flag, then `JSEED_CONFIG`) must exist. Otherwise
/// `./jseed.toml` and then `<config dir>/jseed/config.toml` are used when
/// present; no file at all is fine.
pub fn locate(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit.map(Path::to_path_buf).or_else(env::config_path) {
        if !path.is_file() {
            return Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path));
    }
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Ok(Some(local));
    }
    Ok(dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file()))
}

/// Loads settings from the located file and the environment.
pub fn load_settings(explicit: Option<&Path>) -> Result<(Settings, Option<PathBuf>)> {
    let path = locate(explicit)?;
    let settings = match &path {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let settings = settings.with_env(env::non_empty)?;
    Ok((settings, path))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
