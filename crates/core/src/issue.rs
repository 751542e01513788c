// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue types for the seeded Jira hierarchy.
//!
//! This module contains the hierarchy levels, the natural key used for
//! find-or-create lookups, the create request ([`IssueSpec`]) and the issue
//! records returned by the tracker ([`IssueRecord`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::link::IssueLinkRecord;

/// Issue type name of the governance constraint type created by jseed.
pub const CONSTRAINT_TYPE: &str = "Constraint";

/// Issue type name of the level below Feature. Verified, never created.
pub const STORY_TYPE: &str = "Story";

/// Level in the four-level portfolio hierarchy.
///
/// Ordered top-down, so sorting levels yields traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HierarchyLevel {
    #[serde(rename = "Strategic Objective")]
    StrategicObjective,
    #[serde(rename = "Portfolio Epic")]
    PortfolioEpic,
    #[serde(rename = "Business Outcome")]
    BusinessOutcome,
    #[serde(rename = "Feature")]
    Feature,
}

impl HierarchyLevel {
    /// All levels, top-down.
    pub const ALL: [HierarchyLevel; 4] = [
        HierarchyLevel::StrategicObjective,
        HierarchyLevel::PortfolioEpic,
        HierarchyLevel::BusinessOutcome,
        HierarchyLevel::Feature,
    ];

    /// Returns the Jira issue type name for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            HierarchyLevel::StrategicObjective => "Strategic Objective",
            HierarchyLevel::PortfolioEpic => "Portfolio Epic",
            HierarchyLevel::BusinessOutcome => "Business Outcome",
            HierarchyLevel::Feature => "Feature",
        }
    }

    /// Plural heading used in summaries.
    pub fn plural(&self) -> &'static str {
        match self {
            HierarchyLevel::StrategicObjective => "Strategic Objectives",
            HierarchyLevel::PortfolioEpic => "Portfolio Epics",
            HierarchyLevel::BusinessOutcome => "Business Outcomes",
            HierarchyLevel::Feature => "Features",
        }
    }

    /// Returns the level directly below this one, if any.
    pub fn child(&self) -> Option<HierarchyLevel> {
        match self {
            HierarchyLevel::StrategicObjective => Some(HierarchyLevel::PortfolioEpic),
            HierarchyLevel::PortfolioEpic => Some(HierarchyLevel::BusinessOutcome),
            HierarchyLevel::BusinessOutcome => Some(HierarchyLevel::Feature),
            HierarchyLevel::Feature => None,
        }
    }

    /// Position in the hierarchy, 1 for Strategic Objective.
    pub fn depth(&self) -> usize {
        match self {
            HierarchyLevel::StrategicObjective => 1,
            HierarchyLevel::PortfolioEpic => 2,
            HierarchyLevel::BusinessOutcome => 3,
            HierarchyLevel::Feature => 4,
        }
    }
}

impl fmt::Display for HierarchyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HierarchyLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        HierarchyLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidLevel(s.to_string()))
    }
}

/// Every issue type the seeded hierarchy expects to find in Jira.
pub fn hierarchy_type_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = HierarchyLevel::ALL.iter().map(|l| l.as_str()).collect();
    names.push(STORY_TYPE);
    names
}

/// Identity of an issue for idempotency purposes.
///
/// Jira does not enforce uniqueness of summaries; jseed assumes summaries are
/// unique within a project and issue type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NaturalKey {
    pub project: String,
    pub issue_type: String,
    pub summary: String,
}

impl NaturalKey {
    pub fn new(
        project: impl Into<String>,
        issue_type: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        NaturalKey {
            project: project.into(),
            issue_type: issue_type.into(),
            summary: summary.into(),
        }
    }
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.project, self.issue_type, self.summary)
    }
}

/// Request to create an issue.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueSpec {
    pub project: String,
    pub issue_type: String,
    pub summary: String,
    pub description: Option<String>,
    /// Parent issue key, written to the configured parent-link field.
    pub parent: Option<String>,
    pub fix_versions: Vec<String>,
    /// Custom field values keyed by field name (resolved to ids at send time).
    pub custom_fields: Vec<(String, String)>,
    pub labels: Vec<String>,
}

impl IssueSpec {
    pub fn new(
        project: impl Into<String>,
        issue_type: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        IssueSpec {
            project: project.into(),
            issue_type: issue_type.into(),
            summary: summary.into(),
            description: None,
            parent: None,
            fix_versions: Vec::new(),
            custom_fields: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = description.map(String::from);
        self
    }

    pub fn with_parent(mut self, parent: Option<&str>) -> Self {
        self.parent = parent.map(String::from);
        self
    }

    pub fn with_fix_version(mut self, version: impl Into<String>) -> Self {
        self.fix_versions.push(version.into());
        self
    }

    pub fn with_custom_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_fields.push((name.into(), value.into()));
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn natural_key(&self) -> NaturalKey {
        NaturalKey::new(&self.project, &self.issue_type, &self.summary)
    }
}

/// A `{ "name": ... }` reference as Jira embeds it in issue fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

impl NamedRef {
    pub fn new(name: impl Into<String>) -> Self {
        NamedRef {
            id: None,
            name: name.into(),
        }
    }
}

/// The subset of issue fields jseed reads back.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub issuetype: Option<NamedRef>,
    #[serde(default)]
    pub status: Option<NamedRef>,
    #[serde(default, rename = "fixVersions")]
    pub fix_versions: Vec<NamedRef>,
    #[serde(default)]
    pub issuelinks: Vec<IssueLinkRecord>,
}

/// An issue as returned by search, get, or create.
///
/// Create responses carry only `id` and `key`; the remaining fields default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
}

impl IssueRecord {
    /// Builds a record from a create request and the key Jira assigned.
    pub fn from_spec(key: impl Into<String>, id: Option<String>, spec: &IssueSpec) -> Self {
        IssueRecord {
            id,
            key: key.into(),
            fields: IssueFields {
                summary: Some(spec.summary.clone()),
                issuetype: Some(NamedRef::new(&spec.issue_type)),
                status: None,
                fix_versions: spec.fix_versions.iter().map(NamedRef::new).collect(),
                issuelinks: Vec::new(),
            },
        }
    }

    pub fn summary(&self) -> &str {
        self.fields.summary.as_deref().unwrap_or("")
    }

    pub fn issue_type(&self) -> Option<&str> {
        self.fields.issuetype.as_ref().map(|t| t.name.as_str())
    }

    pub fn status(&self) -> Option<&str> {
        self.fields.status.as_ref().map(|s| s.name.as_str())
    }
}

/// Kind of a Jira issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueTypeKind {
    Standard,
    Subtask,
}

impl IssueTypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueTypeKind::Standard => "standard",
            IssueTypeKind::Subtask => "subtask",
        }
    }
}

impl fmt::Display for IssueTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IssueTypeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(IssueTypeKind::Standard),
            "subtask" => Ok(IssueTypeKind::Subtask),
            _ => Err(Error::InvalidIssueTypeKind(s.to_string())),
        }
    }
}

/// Request to create an issue type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueTypeSpec {
    pub name: String,
    pub description: String,
    pub kind: IssueTypeKind,
}

impl IssueTypeSpec {
    /// The governance Constraint issue type.
    pub fn constraint() -> Self {
        IssueTypeSpec {
            name: CONSTRAINT_TYPE.to_string(),
            description: "Governance constraint that blocks deployment until resolved".to_string(),
            kind: IssueTypeKind::Standard,
        }
    }
}

/// An issue type as returned by `GET /issuetype`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTypeRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subtask: bool,
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
