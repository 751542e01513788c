// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Hierarchy builder.
//!
//! Walks each objective tree depth-first, parents before children. Every
//! node is looked up by (project, type, summary) before it is created, and
//! children are wired to their parent through the parent-link field. A node
//! that cannot be ensured takes its whole subtree with it; its siblings
//! carry on.

use std::collections::BTreeMap;

use jseed_core::{HierarchyLevel, HierarchyNode, IssueSpec};
use tracing::{debug, error};

use super::{Context, Tally};
use crate::error::Result;
use crate::gateway::{Gateway, Transport};
use crate::interrupt::Cancel;

/// An issue the builder created or found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltItem {
    pub level: HierarchyLevel,
    pub key: String,
    pub summary: String,
    pub parent: Option<String>,
    pub created: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HierarchyReport {
    pub levels: BTreeMap<HierarchyLevel, Tally>,
    pub built: Vec<BuiltItem>,
    /// Descendants never attempted because an ancestor failed.
    pub skipped: usize,
}

impl HierarchyReport {
    pub fn level(&self, level: HierarchyLevel) -> Tally {
        self.levels.get(&level).copied().unwrap_or_default()
    }

    pub fn total(&self) -> Tally {
        let mut total = Tally::default();
        for tally in self.levels.values() {
            total.add(*tally);
        }
        total
    }
}

pub fn run<T: Transport>(ctx: &mut Context<T>, report: &mut HierarchyReport) -> Result<()> {
    for tree in &ctx.seed.objectives {
        build(
            &mut ctx.gateway,
            &ctx.cancel,
            &tree.project,
            &tree.root,
            None,
            report,
        )?;
    }
    Ok(())
}

fn build<T: Transport>(
    gateway: &mut Gateway<T>,
    cancel: &Cancel,
    project: &str,
    node: &HierarchyNode,
    parent: Option<&str>,
    report: &mut HierarchyReport,
) -> Result<()> {
    cancel.check()?;

    let spec = IssueSpec::new(project, node.level.as_str(), &node.summary)
        .with_description(node.description.as_deref())
        .with_parent(parent);
    let tally = report.levels.entry(node.level).or_default();
    let ensured = match gateway.ensure_issue(&spec) {
        Ok(ensured) => ensured,
        Err(e) => {
            let skipped = descendants(node);
            error!(
                project,
                level = %node.level,
                summary = %node.summary,
                skipped,
                error = %e,
                "failed to ensure issue, skipping its children"
            );
            tally.fail();
            report.skipped += skipped;
            return Ok(());
        }
    };
    tally.record(&ensured);
    let created = ensured.was_created();
    let key = ensured.into_inner().key;
    debug!(key = %key, level = %node.level, parent, created, "hierarchy node ready");

    report.built.push(BuiltItem {
        level: node.level,
        key: key.clone(),
        summary: node.summary.clone(),
        parent: parent.map(String::from),
        created,
    });

    for child in &node.children {
        build(gateway, cancel, project, child, Some(&key), report)?;
    }
    Ok(())
}

fn descendants(node: &HierarchyNode) -> usize {
    let mut count = 0;
    node.walk(&mut |_| count += 1);
    count - 1
}

#[cfg(test)]
#[path = "hierarchy_tests.rs"]
mod tests;
