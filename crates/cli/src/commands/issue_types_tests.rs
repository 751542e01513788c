// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::testing::{context, small_seed};
use crate::gateway::test_helpers::FakeJira;
use crate::gateway::Method;
use jseed_core::CONSTRAINT_TYPE;

#[test]
fn creates_constraint_type_and_verifies_hierarchy() {
    let fake = FakeJira::new();
    let mut report = IssueTypeReport::default();

    run(&mut context(&fake, small_seed(), false), &mut report).unwrap();

    assert_eq!(report.constraint.created, 1);
    assert!(fake.issue_types().iter().any(|t| t == CONSTRAINT_TYPE));
    assert_eq!(
        report.verified,
        vec![
            "Strategic Objective",
            "Portfolio Epic",
            "Business Outcome",
            "Feature",
            "Story"
        ]
    );
    assert!(report.missing.is_empty());
    assert!(report.missing_statuses.is_empty());
}

#[test]
fn existing_constraint_type_is_not_recreated() {
    let fake = FakeJira::new();
    fake.add_issue_type(CONSTRAINT_TYPE);
    let mut report = IssueTypeReport::default();

    run(&mut context(&fake, small_seed(), false), &mut report).unwrap();

    assert_eq!(report.constraint, Tally { created: 0, existing: 1, errors: 0 });
    assert_eq!(fake.count(Method::Post, "issuetype"), 0);
}

#[test]
fn reports_missing_hierarchy_types() {
    let fake = FakeJira::new();
    fake.remove_issue_type("Portfolio Epic");
    fake.remove_issue_type("Story");
    let mut report = IssueTypeReport::default();

    run(&mut context(&fake, small_seed(), false), &mut report).unwrap();

    assert_eq!(report.missing, vec!["Portfolio Epic", "Story"]);
    assert_eq!(report.verified.len(), 3);
}

#[test]
fn lookup_failure_is_counted() {
    let fake = FakeJira::new();
    fake.fail_on(Method::Get, "status", 503);
    let mut report = IssueTypeReport::default();

    run(&mut context(&fake, small_seed(), false), &mut report).unwrap();

    assert_eq!(report.lookup_errors, 1);
    assert_eq!(report.constraint.created, 1);
}

#[test]
fn dry_run_only_reads() {
    let fake = FakeJira::new();
    let mut report = IssueTypeReport::default();

    run(&mut context(&fake, small_seed(), true), &mut report).unwrap();

    assert_eq!(report.constraint.created, 1);
    assert!(fake.mutating_requests().is_empty());
}
