// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Custom fields carried by Constraint issues, and the screens they are
//! placed on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const CUSTOM_TYPE_PREFIX: &str = "com.atlassian.jira.plugin.system.customfieldtypes";

pub const RISK_MATERIALITY: &str = "Risk Materiality";
pub const MITIGATION_PLAN: &str = "Mitigation Plan";
pub const GUILD: &str = "Guild";

/// Declared kind of a custom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Select,
    Textarea,
    Text,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Select => "select",
            FieldKind::Textarea => "textarea",
            FieldKind::Text => "text",
        }
    }

    /// Jira custom field type key.
    pub fn type_key(&self) -> String {
        let suffix = match self {
            FieldKind::Select => "select",
            FieldKind::Textarea => "textarea",
            FieldKind::Text => "textfield",
        };
        format!("{}:{}", CUSTOM_TYPE_PREFIX, suffix)
    }

    /// Searcher key; select fields get none.
    pub fn searcher_key(&self) -> Option<String> {
        match self {
            FieldKind::Select => None,
            FieldKind::Textarea | FieldKind::Text => {
                Some(format!("{}:textsearcher", CUSTOM_TYPE_PREFIX))
            }
        }
    }

    /// Whether values can be written as plain strings on create.
    pub fn is_text(&self) -> bool {
        !matches!(self, FieldKind::Select)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "select" => Ok(FieldKind::Select),
            "textarea" => Ok(FieldKind::Textarea),
            "text" | "textfield" => Ok(FieldKind::Text),
            _ => Err(Error::InvalidFieldKind(s.to_string())),
        }
    }
}

/// Owning guild of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Guild {
    Security,
    Data,
    Operations,
    #[serde(rename = "Enterprise Architecture")]
    EnterpriseArchitecture,
}

impl Guild {
    pub const ALL: [Guild; 4] = [
        Guild::Security,
        Guild::Data,
        Guild::Operations,
        Guild::EnterpriseArchitecture,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Guild::Security => "Security",
            Guild::Data => "Data",
            Guild::Operations => "Operations",
            Guild::EnterpriseArchitecture => "Enterprise Architecture",
        }
    }

    /// Issue label for the guild, e.g. `guild-enterprise-architecture`.
    pub fn label(&self) -> String {
        format!("guild-{}", self.as_str().to_lowercase().replace(' ', "-"))
    }
}

impl fmt::Display for Guild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Risk materiality of a constraint, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Materiality {
    Critical,
    High,
    Medium,
    Low,
}

impl Materiality {
    pub const ALL: [Materiality; 4] = [
        Materiality::Critical,
        Materiality::High,
        Materiality::Medium,
        Materiality::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Materiality::Critical => "Critical",
            Materiality::High => "High",
            Materiality::Medium => "Medium",
            Materiality::Low => "Low",
        }
    }
}

impl fmt::Display for Materiality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request to create a custom field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomFieldSpec {
    pub name: String,
    pub description: String,
    pub kind: FieldKind,
    /// Options for select fields. Not pushed to Jira; listed as a manual step.
    pub options: Vec<String>,
}

/// The custom fields every Constraint carries.
pub fn constraint_fields() -> Vec<CustomFieldSpec> {
    vec![
        CustomFieldSpec {
            name: RISK_MATERIALITY.to_string(),
            description: "Materiality of the risk a constraint guards against".to_string(),
            kind: FieldKind::Select,
            // Jira lists options in ascending severity.
            options: Materiality::ALL
                .iter()
                .rev()
                .map(|m| m.as_str().to_string())
                .collect(),
        },
        CustomFieldSpec {
            name: MITIGATION_PLAN.to_string(),
            description: "Plan for resolving the constraint".to_string(),
            kind: FieldKind::Textarea,
            options: Vec::new(),
        },
        CustomFieldSpec {
            name: GUILD.to_string(),
            description: "Guild that owns the constraint".to_string(),
            kind: FieldKind::Select,
            options: Guild::ALL.iter().map(|g| g.as_str().to_string()).collect(),
        },
    ]
}

/// Schema block of a field listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(default, rename = "type")]
    pub value_type: Option<String>,
    #[serde(default)]
    pub custom: Option<String>,
}

/// A field as returned by `GET /field`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub schema: Option<FieldSchema>,
}

impl FieldRecord {
    /// Select values must be written as `{"value": ...}` objects.
    pub fn is_select(&self) -> bool {
        self.schema.as_ref().is_some_and(|schema| {
            schema.value_type.as_deref() == Some("option")
                || schema
                    .custom
                    .as_deref()
                    .is_some_and(|c| c.ends_with(":select"))
        })
    }
}

/// A screen as returned by `GET /screens`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    pub id: i64,
    pub name: String,
}

/// A tab of a screen (`GET /screens/{id}/tabs`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenTab {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
#[path = "field_tests.rs"]
mod tests;
