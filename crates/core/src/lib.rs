// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core library for jseed.
//!
//! This crate holds the domain of the Jira seeding tool:
//! - The four-level portfolio hierarchy and issue records
//! - Projects, versions, custom fields and screens
//! - The Constraint workflow and its fixed transition paths
//! - The embedded seed dataset

pub mod error;
pub mod field;
pub mod issue;
pub mod link;
pub mod project;
pub mod seed;
pub mod workflow;

pub use error::{Error, Result};
pub use field::{
    constraint_fields, CustomFieldSpec, FieldKind, FieldRecord, FieldSchema, Guild, Materiality, Screen,
    ScreenTab, GUILD, MITIGATION_PLAN, RISK_MATERIALITY,
};
pub use issue::{
    hierarchy_type_names, HierarchyLevel, IssueFields, IssueRecord, IssueSpec, IssueTypeKind,
    IssueTypeRecord, IssueTypeSpec, NamedRef, NaturalKey, CONSTRAINT_TYPE, STORY_TYPE,
};
pub use link::{has_outward_link, IssueLinkRecord, LinkTypeRecord, BLOCKS};
pub use project::{CurrentUser, ProjectRecord, ProjectSpec, VersionRecord, VersionSpec};
pub use seed::{
    unreleased_versions, BlocksTarget, ConstraintCounts, ConstraintSeed, HierarchyNode,
    ObjectiveTree, ProjectSeed, SeedData, VersionSeed, VERSIONS,
};
pub use workflow::{ConstraintStatus, Transition, TransitionRecord, TRANSITIONS};
