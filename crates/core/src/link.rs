// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue link types.
//!
//! A Blocks link is directed: the outward issue blocks the inward one. On the
//! blocking issue Jira reports the link with `outwardIssue` set to the issue
//! it blocks; on the blocked issue the link carries `inwardIssue` instead.

use serde::{Deserialize, Serialize};

/// Name of the link type used from constraints to hierarchy items.
pub const BLOCKS: &str = "Blocks";

/// A link type as returned by `GET /issueLinkType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTypeRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub inward: Option<String>,
    #[serde(default)]
    pub outward: Option<String>,
}

/// Issue reference inside a link entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedIssue {
    pub key: String,
}

/// Link type reference inside a link entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTypeRef {
    pub name: String,
}

/// One entry of an issue's `issuelinks` field, seen from that issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueLinkRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub link_type: LinkTypeRef,
    #[serde(
        default,
        rename = "inwardIssue",
        skip_serializing_if = "Option::is_none"
    )]
    pub inward_issue: Option<LinkedIssue>,
    #[serde(
        default,
        rename = "outwardIssue",
        skip_serializing_if = "Option::is_none"
    )]
    pub outward_issue: Option<LinkedIssue>,
}

impl IssueLinkRecord {
    /// Entry as recorded on the outward issue of a link to `target`.
    pub fn outward(link_type: &str, target: &str) -> Self {
        IssueLinkRecord {
            id: None,
            link_type: LinkTypeRef {
                name: link_type.to_string(),
            },
            inward_issue: None,
            outward_issue: Some(LinkedIssue {
                key: target.to_string(),
            }),
        }
    }

    /// Entry as recorded on the inward issue of a link from `source`.
    pub fn inward(link_type: &str, source: &str) -> Self {
        IssueLinkRecord {
            id: None,
            link_type: LinkTypeRef {
                name: link_type.to_string(),
            },
            inward_issue: Some(LinkedIssue {
                key: source.to_string(),
            }),
            outward_issue: None,
        }
    }

    /// True when this entry says the owning issue `link_type`s `target`.
    pub fn points_out_to(&self, link_type: &str, target: &str) -> bool {
        self.link_type.name == link_type
            && self
                .outward_issue
                .as_ref()
                .is_some_and(|issue| issue.key == target)
    }
}

/// True when `links` (from the owning issue) contain an outward `link_type`
/// link to `target`.
pub fn has_outward_link(links: &[IssueLinkRecord], link_type: &str, target: &str) -> bool {
    links.iter().any(|l| l.points_out_to(link_type, target))
}

#[cfg(test)]
#[path = "link_tests.rs"]
mod tests;
