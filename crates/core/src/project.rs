// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Projects, versions and the authenticated user.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Jira project type key for every seeded project.
pub const SOFTWARE_PROJECT: &str = "software";

/// Request to create a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSpec {
    pub key: String,
    pub name: String,
    pub description: String,
    /// Username of the project lead.
    pub lead: String,
    pub project_type: String,
}

impl ProjectSpec {
    pub fn software(
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        lead: impl Into<String>,
    ) -> Self {
        ProjectSpec {
            key: key.into(),
            name: name.into(),
            description: description.into(),
            lead: lead.into(),
            project_type: SOFTWARE_PROJECT.to_string(),
        }
    }
}

/// A project as returned by `GET /project/{key}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Request to create a version in a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
    pub project: String,
    pub name: String,
    pub description: String,
    pub released: bool,
    pub start_date: Option<NaiveDate>,
    pub release_date: Option<NaiveDate>,
}

/// A version as returned by `GET /project/{key}/versions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub released: bool,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

/// The account behind the configured token (`GET /myself`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
}

impl CurrentUser {
    /// Display name, falling back to the username.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
