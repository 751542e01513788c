// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Constraint workflow: statuses, named transitions, and the fixed paths
//! used to move a freshly created constraint to its seeded status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::issue::NamedRef;

/// Status of a Constraint issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConstraintStatus {
    #[serde(rename = "Identified")]
    Identified,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Ready for Review")]
    ReadyForReview,
    #[serde(rename = "Closed")]
    Closed,
}

impl ConstraintStatus {
    pub const ALL: [ConstraintStatus; 4] = [
        ConstraintStatus::Identified,
        ConstraintStatus::InProgress,
        ConstraintStatus::ReadyForReview,
        ConstraintStatus::Closed,
    ];

    /// Status a new constraint starts in.
    pub const INITIAL: ConstraintStatus = ConstraintStatus::Identified;

    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintStatus::Identified => "Identified",
            ConstraintStatus::InProgress => "In Progress",
            ConstraintStatus::ReadyForReview => "Ready for Review",
            ConstraintStatus::Closed => "Closed",
        }
    }

    /// Transition names that take a constraint from [`Self::INITIAL`] to
    /// this status, in order.
    pub fn transition_path(&self) -> &'static [&'static str] {
        match self {
            ConstraintStatus::Identified => &[],
            ConstraintStatus::InProgress => &[START_WORK],
            ConstraintStatus::ReadyForReview => &[START_WORK, SUBMIT_FOR_REVIEW],
            ConstraintStatus::Closed => &[START_WORK, SUBMIT_FOR_REVIEW, APPROVE_AND_CLOSE],
        }
    }
}

impl fmt::Display for ConstraintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConstraintStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ConstraintStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidStatus(s.to_string()))
    }
}

pub const START_WORK: &str = "Start Work";
pub const SUBMIT_FOR_REVIEW: &str = "Submit for Review";
pub const APPROVE_AND_CLOSE: &str = "Approve & Close";
pub const REJECT: &str = "Reject";
pub const STOP_WORK: &str = "Stop Work";

/// A named edge in the constraint workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub name: &'static str,
    pub from: ConstraintStatus,
    pub to: ConstraintStatus,
}

/// Every transition of the constraint workflow.
pub const TRANSITIONS: [Transition; 5] = [
    Transition {
        name: START_WORK,
        from: ConstraintStatus::Identified,
        to: ConstraintStatus::InProgress,
    },
    Transition {
        name: SUBMIT_FOR_REVIEW,
        from: ConstraintStatus::InProgress,
        to: ConstraintStatus::ReadyForReview,
    },
    Transition {
        name: APPROVE_AND_CLOSE,
        from: ConstraintStatus::ReadyForReview,
        to: ConstraintStatus::Closed,
    },
    Transition {
        name: REJECT,
        from: ConstraintStatus::ReadyForReview,
        to: ConstraintStatus::InProgress,
    },
    Transition {
        name: STOP_WORK,
        from: ConstraintStatus::InProgress,
        to: ConstraintStatus::Identified,
    },
];

/// Transitions available from `status`.
pub fn transitions_from(status: ConstraintStatus) -> impl Iterator<Item = &'static Transition> {
    TRANSITIONS.iter().filter(move |t| t.from == status)
}

/// A transition as listed by `GET /issue/{key}/transitions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub to: Option<NamedRef>,
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
