// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Embedded seed dataset.
//!
//! The projects, the objective trees and the constraints ship as JSON inside
//! the binary. [`SeedData::embedded`] parses and validates them once; the
//! version list is fixed in code.

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};

use crate::error::{Error, Result};
use crate::field::{Guild, Materiality};
use crate::issue::HierarchyLevel;
use crate::workflow::ConstraintStatus;

const PROJECTS_JSON: &str = include_str!("../data/projects.json");
const HIERARCHY_JSON: &str = include_str!("../data/hierarchy.json");
const CONSTRAINTS_JSON: &str = include_str!("../data/constraints.json");

/// A seeded project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectSeed {
    pub key: String,
    pub name: String,
    pub description: String,
    /// Lead username; the configured user when absent.
    #[serde(default)]
    pub lead: Option<String>,
}

/// A node of an objective tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode {
    pub level: HierarchyLevel,
    pub summary: String,
    pub description: Option<String>,
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Visits this node and its descendants in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a HierarchyNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// One strategic objective with everything beneath it, all in one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveTree {
    pub project: String,
    pub root: HierarchyNode,
}

/// Hierarchy item a constraint blocks, referenced by natural key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlocksTarget {
    pub project: String,
    #[serde(rename = "type")]
    pub level: HierarchyLevel,
    pub summary: String,
}

/// A seeded governance constraint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConstraintSeed {
    pub summary: String,
    pub description: String,
    pub guild: Guild,
    pub risk_materiality: Materiality,
    pub mitigation_plan: String,
    pub status: ConstraintStatus,
    pub blocks: BlocksTarget,
}

/// A version created in every project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionSeed {
    pub name: &'static str,
    pub description: &'static str,
    pub released: bool,
}

pub const VERSIONS: [VersionSeed; 5] = [
    VersionSeed {
        name: "v1.0.0",
        description: "Initial release",
        released: true,
    },
    VersionSeed {
        name: "v1.1.0",
        description: "Bug fixes and improvements",
        released: true,
    },
    VersionSeed {
        name: "v2.0.0",
        description: "Current development sprint",
        released: false,
    },
    VersionSeed {
        name: "v2.1.0",
        description: "Next planned release",
        released: false,
    },
    VersionSeed {
        name: "v3.0.0",
        description: "Future major release",
        released: false,
    },
];

/// Unreleased version names, in the order features are assigned to them.
pub fn unreleased_versions() -> Vec<&'static str> {
    VERSIONS
        .iter()
        .filter(|v| !v.released)
        .map(|v| v.name)
        .collect()
}

#[derive(Deserialize)]
struct RawItem {
    summary: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct RawOutcome {
    #[serde(flatten)]
    item: RawItem,
    #[serde(default)]
    features: Vec<RawItem>,
}

#[derive(Deserialize)]
struct RawEpic {
    #[serde(flatten)]
    item: RawItem,
    #[serde(default)]
    business_outcomes: Vec<RawOutcome>,
}

#[derive(Deserialize)]
struct RawObjectiveRoot {
    #[serde(flatten)]
    item: RawItem,
    project: String,
}

#[derive(Deserialize)]
struct RawObjective {
    strategic_objective: RawObjectiveRoot,
    #[serde(default)]
    portfolio_epics: Vec<RawEpic>,
}

fn node(level: HierarchyLevel, item: RawItem, children: Vec<HierarchyNode>) -> HierarchyNode {
    HierarchyNode {
        level,
        summary: item.summary,
        description: item.description,
        children,
    }
}

impl From<RawObjective> for ObjectiveTree {
    fn from(raw: RawObjective) -> Self {
        let epics = raw
            .portfolio_epics
            .into_iter()
            .map(|epic| {
                let outcomes = epic
                    .business_outcomes
                    .into_iter()
                    .map(|outcome| {
                        let features = outcome
                            .features
                            .into_iter()
                            .map(|f| node(HierarchyLevel::Feature, f, Vec::new()))
                            .collect();
                        node(HierarchyLevel::BusinessOutcome, outcome.item, features)
                    })
                    .collect();
                node(HierarchyLevel::PortfolioEpic, epic.item, outcomes)
            })
            .collect();
        ObjectiveTree {
            project: raw.strategic_objective.project,
            root: node(
                HierarchyLevel::StrategicObjective,
                raw.strategic_objective.item,
                epics,
            ),
        }
    }
}

/// Counts of constraints grouped three ways.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintCounts {
    pub total: usize,
    pub by_guild: BTreeMap<Guild, usize>,
    pub by_status: BTreeMap<ConstraintStatus, usize>,
    pub by_materiality: BTreeMap<Materiality, usize>,
}

/// The whole seed dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedData {
    pub projects: Vec<ProjectSeed>,
    pub objectives: Vec<ObjectiveTree>,
    pub constraints: Vec<ConstraintSeed>,
}

impl SeedData {
    /// Loads the dataset compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(PROJECTS_JSON, HIERARCHY_JSON, CONSTRAINTS_JSON)
    }

    /// Parses and validates a dataset from its three JSON documents.
    pub fn from_json(projects: &str, hierarchy: &str, constraints: &str) -> Result<Self> {
        let projects: Vec<ProjectSeed> = serde_json::from_str(projects)?;
        let raw: Vec<RawObjective> = serde_json::from_str(hierarchy)?;
        let constraints: Vec<ConstraintSeed> = serde_json::from_str(constraints)?;
        let data = SeedData {
            projects,
            objectives: raw.into_iter().map(ObjectiveTree::from).collect(),
            constraints,
        };
        data.validate()?;
        Ok(data)
    }

    fn validate(&self) -> Result<()> {
        let mut keys = HashSet::new();
        for project in &self.projects {
            if !keys.insert(project.key.as_str()) {
                return Err(Error::InvalidSeed {
                    file: "projects.json",
                    reason: format!("duplicate project key {}", project.key),
                });
            }
        }

        let mut seen = HashSet::new();
        for tree in &self.objectives {
            if !keys.contains(tree.project.as_str()) {
                return Err(Error::InvalidSeed {
                    file: "hierarchy.json",
                    reason: format!(
                        "objective '{}' names unknown project {}",
                        tree.root.summary, tree.project
                    ),
                });
            }
            let mut duplicate = None;
            tree.root.walk(&mut |n| {
                if !seen.insert((tree.project.as_str(), n.level, n.summary.as_str()))
                    && duplicate.is_none()
                {
                    duplicate = Some(n);
                }
            });
            if let Some(n) = duplicate {
                return Err(Error::InvalidSeed {
                    file: "hierarchy.json",
                    reason: format!("duplicate {} '{}' in {}", n.level, n.summary, tree.project),
                });
            }
        }

        for constraint in &self.constraints {
            let target = &constraint.blocks;
            if !seen.contains(&(
                target.project.as_str(),
                target.level,
                target.summary.as_str(),
            )) {
                return Err(Error::InvalidSeed {
                    file: "constraints.json",
                    reason: format!(
                        "'{}' blocks unknown {} '{}' in {}",
                        constraint.summary, target.level, target.summary, target.project
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn project(&self, key: &str) -> Option<&ProjectSeed> {
        self.projects.iter().find(|p| p.key == key)
    }

    /// Number of hierarchy nodes per level across every tree.
    pub fn level_counts(&self) -> BTreeMap<HierarchyLevel, usize> {
        let mut counts: BTreeMap<HierarchyLevel, usize> =
            HierarchyLevel::ALL.iter().map(|l| (*l, 0)).collect();
        for tree in &self.objectives {
            tree.root.walk(&mut |n| *counts.entry(n.level).or_default() += 1);
        }
        counts
    }

    pub fn constraint_counts(&self) -> ConstraintCounts {
        let mut counts = ConstraintCounts::default();
        for c in &self.constraints {
            counts.total += 1;
            *counts.by_guild.entry(c.guild).or_default() += 1;
            *counts.by_status.entry(c.status).or_default() += 1;
            *counts.by_materiality.entry(c.risk_materiality).or_default() += 1;
        }
        counts
    }
}

#[cfg(test)]
#[path = "seed_tests.rs"]
mod tests;
