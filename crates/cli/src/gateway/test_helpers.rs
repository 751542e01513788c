// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory Jira for gateway and phase tests.
//!
//! [`FakeJira`] answers the REST calls the gateway makes against shared
//! state, records every request, and can be told to fail specific calls.
//! Clones share state, so a test keeps one handle and gives another to the
//! gateway.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use jseed_core::workflow::transitions_from;
use jseed_core::{
    ConstraintStatus, FieldRecord, FieldSchema, IssueLinkRecord, IssueTypeRecord, LinkTypeRecord,
    Screen, ScreenTab, VersionRecord, CONSTRAINT_TYPE, TRANSITIONS,
};
use regex::Regex;
use serde_json::{json, Map, Value};

use super::client::Gateway;
use super::transport::{Method, Request, Response, Transport, TransportResult};
use crate::config::Config;

pub const DEFAULT_SCREEN: i64 = 1;
pub const DEFAULT_TAB: i64 = 10000;

/// Settings used by every fake-backed gateway.
pub fn test_config() -> Config {
    Config {
        base_url: "https://jira.test".to_string(),
        username: "admin".to_string(),
        token: "token-1234567890".to_string(),
        verify_tls: true,
        parent_link_field: "customfield_10108".to_string(),
        default_screen_id: DEFAULT_SCREEN,
        constraint_labels: false,
    }
}

/// A gateway wired to `fake`.
pub fn gateway(fake: &FakeJira, preview: bool) -> Gateway<FakeJira> {
    Gateway::with_transport(fake.clone(), &test_config(), preview)
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeIssue {
    pub id: u64,
    pub key: String,
    pub project: String,
    pub issue_type: String,
    pub summary: String,
    pub status: String,
    pub fix_versions: Vec<String>,
    /// Every other field as sent on create or update.
    pub fields: Map<String, Value>,
    pub links: Vec<IssueLinkRecord>,
}

impl FakeIssue {
    pub fn field(&self, id: &str) -> Option<&Value> {
        self.fields.get(id)
    }

    fn to_json(&self) -> Value {
        let mut fields = self.fields.clone();
        fields.insert("summary".into(), json!(self.summary));
        fields.insert("issuetype".into(), json!({ "name": self.issue_type }));
        fields.insert("status".into(), json!({ "name": self.status }));
        fields.insert(
            "fixVersions".into(),
            Value::Array(self.fix_versions.iter().map(|v| json!({ "name": v })).collect()),
        );
        fields.insert("issuelinks".into(), serde_json::to_value(&self.links).unwrap());
        json!({ "id": self.id.to_string(), "key": self.key, "fields": fields })
    }
}

#[derive(Debug, Clone)]
struct FailRule {
    method: Method,
    path_prefix: String,
    summary: Option<String>,
    status: u16,
}

#[derive(Debug, Default)]
struct FakeState {
    projects: BTreeMap<String, (u64, String)>,
    issue_types: Vec<IssueTypeRecord>,
    fields: Vec<FieldRecord>,
    versions: HashMap<String, Vec<VersionRecord>>,
    issues: Vec<FakeIssue>,
    key_seq: HashMap<String, u64>,
    next_id: u64,
    link_types: Vec<LinkTypeRecord>,
    screens: Vec<Screen>,
    tabs: HashMap<i64, Vec<ScreenTab>>,
    screen_fields: HashMap<(i64, i64), Vec<String>>,
    hidden_transitions: Vec<String>,
    failures: Vec<FailRule>,
    requests: Vec<Request>,
}

impl FakeState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn issue_mut(&mut self, key: &str) -> Option<&mut FakeIssue> {
        self.issues.iter_mut().find(|i| i.key == key)
    }

    fn has_issue(&self, key: &str) -> bool {
        self.issues.iter().any(|i| i.key == key)
    }

    fn insert_issue(&mut self, project: &str, issue_type: &str, summary: &str) -> String {
        let seq = self.key_seq.entry(project.to_string()).or_insert(0);
        *seq += 1;
        let key = format!("{}-{}", project, seq);
        let id = self.next_id();
        let status = if issue_type == CONSTRAINT_TYPE {
            ConstraintStatus::INITIAL.as_str()
        } else {
            "Open"
        };
        self.issues.push(FakeIssue {
            id,
            key: key.clone(),
            project: project.to_string(),
            issue_type: issue_type.to_string(),
            summary: summary.to_string(),
            status: status.to_string(),
            fix_versions: Vec::new(),
            fields: Map::new(),
            links: Vec::new(),
        });
        key
    }

    fn failure_for(&self, request: &Request) -> Option<u16> {
        let summary = request
            .body
            .as_ref()
            .and_then(|b| b.pointer("/fields/summary"))
            .and_then(Value::as_str);
        self.failures
            .iter()
            .find(|rule| {
                rule.method == request.method
                    && request.path.starts_with(&rule.path_prefix)
                    && match &rule.summary {
                        Some(expected) => summary == Some(expected.as_str()),
                        None => true,
                    }
            })
            .map(|rule| rule.status)
    }
}

/// Stateful fake of the Jira REST API.
#[derive(Clone)]
pub struct FakeJira {
    state: Arc<Mutex<FakeState>>,
}

impl Default for FakeJira {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeJira {
    /// An instance with the hierarchy issue types, the Blocks link type and
    /// the default screen, but no projects.
    pub fn new() -> Self {
        let mut state = FakeState::default();
        for name in jseed_core::hierarchy_type_names() {
            let id = state.next_id();
            state.issue_types.push(IssueTypeRecord {
                id: Some(id.to_string()),
                name: name.to_string(),
                description: None,
                subtask: false,
            });
        }
        state.fields.push(FieldRecord {
            id: "summary".to_string(),
            name: "Summary".to_string(),
            custom: false,
            schema: Some(FieldSchema {
                value_type: Some("string".to_string()),
                custom: None,
            }),
        });
        state.link_types = vec![
            LinkTypeRecord {
                id: "10000".to_string(),
                name: "Blocks".to_string(),
                inward: Some("is blocked by".to_string()),
                outward: Some("blocks".to_string()),
            },
            LinkTypeRecord {
                id: "10003".to_string(),
                name: "Relates".to_string(),
                inward: Some("relates to".to_string()),
                outward: Some("relates to".to_string()),
            },
        ];
        state.screens.push(Screen {
            id: DEFAULT_SCREEN,
            name: "Default Screen".to_string(),
        });
        state.tabs.insert(
            DEFAULT_SCREEN,
            vec![ScreenTab {
                id: DEFAULT_TAB,
                name: "Field Tab".to_string(),
            }],
        );
        FakeJira {
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    // -- setup ---------------------------------------------------------------

    pub fn add_project(&self, key: &str) {
        let mut state = self.lock();
        let id = state.next_id();
        state.projects.insert(key.to_string(), (id, key.to_string()));
    }

    pub fn add_issue(&self, project: &str, issue_type: &str, summary: &str) -> String {
        self.lock().insert_issue(project, issue_type, summary)
    }

    pub fn add_issue_type(&self, name: &str) {
        let mut state = self.lock();
        let id = state.next_id();
        state.issue_types.push(IssueTypeRecord {
            id: Some(id.to_string()),
            name: name.to_string(),
            description: None,
            subtask: false,
        });
    }

    pub fn remove_issue_type(&self, name: &str) {
        self.lock().issue_types.retain(|t| t.name != name);
    }

    pub fn remove_link_type(&self, name: &str) {
        self.lock().link_types.retain(|t| t.name != name);
    }

    pub fn add_link(&self, link_type: &str, outward: &str, inward: &str) {
        let mut state = self.lock();
        if let Some(issue) = state.issue_mut(outward) {
            issue.links.push(IssueLinkRecord::outward(link_type, inward));
        }
        if let Some(issue) = state.issue_mut(inward) {
            issue.links.push(IssueLinkRecord::inward(link_type, outward));
        }
    }

    pub fn add_screen(&self, id: i64, name: &str, tab: Option<i64>) {
        let mut state = self.lock();
        state.screens.push(Screen {
            id,
            name: name.to_string(),
        });
        let tabs = tab
            .map(|tab| {
                vec![ScreenTab {
                    id: tab,
                    name: "Field Tab".to_string(),
                }]
            })
            .unwrap_or_default();
        state.tabs.insert(id, tabs);
    }

    /// Removes a transition from every issue's available list.
    pub fn hide_transition(&self, name: &str) {
        self.lock().hidden_transitions.push(name.to_string());
    }

    /// Answers `method` calls whose path starts with `path_prefix` with `status`.
    pub fn fail_on(&self, method: Method, path_prefix: &str, status: u16) {
        self.lock().failures.push(FailRule {
            method,
            path_prefix: path_prefix.to_string(),
            summary: None,
            status,
        });
    }

    /// Rejects issue creation for `summary`.
    pub fn fail_create(&self, summary: &str) {
        self.lock().failures.push(FailRule {
            method: Method::Post,
            path_prefix: "issue".to_string(),
            summary: Some(summary.to_string()),
            status: 500,
        });
    }

    // -- inspection ----------------------------------------------------------

    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    pub fn mutating_requests(&self) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| r.method.is_mutating())
            .collect()
    }

    /// Requests with `method` to exactly `path`.
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn has_project(&self, key: &str) -> bool {
        self.lock().projects.contains_key(key)
    }

    pub fn issue(&self, key: &str) -> Option<FakeIssue> {
        self.lock().issues.iter().find(|i| i.key == key).cloned()
    }

    pub fn find(&self, project: &str, summary: &str) -> Option<FakeIssue> {
        self.lock()
            .issues
            .iter()
            .find(|i| i.project == project && i.summary == summary)
            .cloned()
    }

    pub fn issues(&self) -> Vec<FakeIssue> {
        self.lock().issues.clone()
    }

    pub fn issue_count(&self) -> usize {
        self.lock().issues.len()
    }

    pub fn issue_types(&self) -> Vec<String> {
        self.lock().issue_types.iter().map(|t| t.name.clone()).collect()
    }

    pub fn field_id(&self, name: &str) -> Option<String> {
        self.lock()
            .fields
            .iter()
            .find(|f| f.custom && f.name == name)
            .map(|f| f.id.clone())
    }

    pub fn versions(&self, project: &str) -> Vec<VersionRecord> {
        self.lock().versions.get(project).cloned().unwrap_or_default()
    }

    pub fn screen_fields(&self, screen: i64, tab: i64) -> Vec<String> {
        self.lock()
            .screen_fields
            .get(&(screen, tab))
            .cloned()
            .unwrap_or_default()
    }

    // -- request handling ----------------------------------------------------

    fn handle(state: &mut FakeState, request: &Request) -> Response {
        if let Some(status) = state.failure_for(request) {
            return Response::new(status, json!({ "errorMessages": ["injected failure"] }));
        }
        let segments: Vec<&str> = request.path.split('/').collect();
        let body = request.body.clone().unwrap_or(Value::Null);
        match (request.method, segments.as_slice()) {
            (Method::Get, ["myself"]) => ok(json!({
                "name": "admin",
                "displayName": "Seed Admin",
                "emailAddress": "admin@example.com"
            })),

            (Method::Get, ["project", key]) => match state.projects.get(*key) {
                Some((id, key)) => ok(json!({ "id": id.to_string(), "key": key, "name": key })),
                None => not_found(),
            },
            (Method::Post, ["project"]) => {
                let key = body["key"].as_str().unwrap_or_default().to_string();
                if state.projects.contains_key(&key) {
                    return bad_request("A project with that project key already exists.");
                }
                let id = state.next_id();
                state.projects.insert(key.clone(), (id, key.clone()));
                Response::new(201, json!({ "id": id, "key": key }))
            }
            (Method::Delete, ["project", key]) => {
                if state.projects.remove(*key).is_none() {
                    return not_found();
                }
                state.issues.retain(|i| i.project != *key);
                no_content()
            }
            (Method::Get, ["project", key, "versions"]) => {
                if !state.projects.contains_key(*key) {
                    return not_found();
                }
                ok(serde_json::to_value(state.versions.get(*key).cloned().unwrap_or_default())
                    .unwrap())
            }

            (Method::Get, ["issuetype"]) => ok(serde_json::to_value(&state.issue_types).unwrap()),
            (Method::Post, ["issuetype"]) => {
                let name = body["name"].as_str().unwrap_or_default().to_string();
                if state.issue_types.iter().any(|t| t.name == name) {
                    return bad_request("An issue type with this name already exists.");
                }
                let id = state.next_id();
                let record = IssueTypeRecord {
                    id: Some(id.to_string()),
                    name,
                    description: body["description"].as_str().map(String::from),
                    subtask: body["type"] == "subtask",
                };
                state.issue_types.push(record.clone());
                Response::new(201, serde_json::to_value(record).unwrap())
            }

            (Method::Get, ["field"]) => ok(serde_json::to_value(&state.fields).unwrap()),
            (Method::Post, ["field"]) => {
                let id = format!("customfield_{}", 10200 + state.next_id());
                let type_key = body["type"].as_str().unwrap_or_default().to_string();
                let value_type = if type_key.ends_with(":select") {
                    "option"
                } else {
                    "string"
                };
                let record = FieldRecord {
                    id,
                    name: body["name"].as_str().unwrap_or_default().to_string(),
                    custom: true,
                    schema: Some(FieldSchema {
                        value_type: Some(value_type.to_string()),
                        custom: Some(type_key),
                    }),
                };
                state.fields.push(record.clone());
                Response::new(201, serde_json::to_value(record).unwrap())
            }

            (Method::Post, ["version"]) => {
                let project = body["project"].as_str().unwrap_or_default().to_string();
                if !state.projects.contains_key(&project) {
                    return not_found();
                }
                let id = state.next_id();
                let record = VersionRecord {
                    id: Some(id.to_string()),
                    name: body["name"].as_str().unwrap_or_default().to_string(),
                    released: body["released"].as_bool().unwrap_or(false),
                    release_date: None,
                };
                state.versions.entry(project).or_default().push(record.clone());
                Response::new(201, serde_json::to_value(record).unwrap())
            }

            (Method::Get, ["search"]) => Self::search(state, request),

            (Method::Post, ["issue"]) => Self::create_issue(state, &body),
            (Method::Get, ["issue", key]) => match state.issues.iter().find(|i| i.key == *key) {
                Some(issue) => ok(issue.to_json()),
                None => not_found(),
            },
            (Method::Put, ["issue", key]) => {
                let Some(issue) = state.issue_mut(key) else {
                    return not_found();
                };
                if let Some(fields) = body["fields"].as_object() {
                    for (name, value) in fields {
                        if name == "fixVersions" {
                            issue.fix_versions = value
                                .as_array()
                                .map(|vs| {
                                    vs.iter()
                                        .filter_map(|v| v["name"].as_str().map(String::from))
                                        .collect()
                                })
                                .unwrap_or_default();
                        } else {
                            issue.fields.insert(name.clone(), value.clone());
                        }
                    }
                }
                no_content()
            }
            (Method::Delete, ["issue", key]) => {
                if !state.has_issue(key) {
                    return not_found();
                }
                let key = key.to_string();
                state.issues.retain(|i| i.key != key);
                for issue in &mut state.issues {
                    issue.links.retain(|l| {
                        l.inward_issue.as_ref().map(|i| &i.key) != Some(&key)
                            && l.outward_issue.as_ref().map(|i| &i.key) != Some(&key)
                    });
                }
                no_content()
            }

            (Method::Get, ["issue", key, "transitions"]) => {
                let Some(issue) = state.issues.iter().find(|i| i.key == *key) else {
                    return not_found();
                };
                let transitions: Vec<Value> = match issue.status.parse::<ConstraintStatus>() {
                    Ok(status) if issue.issue_type == CONSTRAINT_TYPE => transitions_from(status)
                        .filter(|t| !state.hidden_transitions.iter().any(|h| h == t.name))
                        .map(|t| {
                            json!({
                                "id": transition_id(t.name),
                                "name": t.name,
                                "to": { "name": t.to.as_str() }
                            })
                        })
                        .collect(),
                    _ => Vec::new(),
                };
                ok(json!({ "transitions": transitions }))
            }
            (Method::Post, ["issue", key, "transitions"]) => {
                let id = body["transition"]["id"].as_str().unwrap_or_default().to_string();
                let Some(issue) = state.issue_mut(key) else {
                    return not_found();
                };
                let current = issue.status.parse::<ConstraintStatus>().ok();
                let step = TRANSITIONS
                    .iter()
                    .find(|t| transition_id(t.name) == id && Some(t.from) == current);
                match step {
                    Some(step) => {
                        issue.status = step.to.as_str().to_string();
                        no_content()
                    }
                    None => bad_request("It seems that you have tried to perform a workflow operation that is not valid."),
                }
            }

            (Method::Get, ["issueLinkType"]) => ok(json!({ "issueLinkTypes": state.link_types })),
            (Method::Post, ["issueLink"]) => {
                let name = body["type"]["name"].as_str().unwrap_or_default().to_string();
                let inward = body["inwardIssue"]["key"].as_str().unwrap_or_default().to_string();
                let outward = body["outwardIssue"]["key"].as_str().unwrap_or_default().to_string();
                if !state.link_types.iter().any(|t| t.name == name)
                    || !state.has_issue(&inward)
                    || !state.has_issue(&outward)
                {
                    return not_found();
                }
                if let Some(issue) = state.issue_mut(&outward) {
                    issue.links.push(IssueLinkRecord::outward(&name, &inward));
                }
                if let Some(issue) = state.issue_mut(&inward) {
                    issue.links.push(IssueLinkRecord::inward(&name, &outward));
                }
                Response::new(201, Value::Null)
            }

            (Method::Get, ["status"]) => {
                let mut names: Vec<&str> = ConstraintStatus::ALL.iter().map(|s| s.as_str()).collect();
                names.extend(["Open", "Done"]);
                ok(Value::Array(
                    names.into_iter().map(|n| json!({ "name": n })).collect(),
                ))
            }

            (Method::Get, ["screens"]) => ok(json!({ "values": state.screens })),
            (Method::Get, ["screens", id, "tabs"]) => {
                let id: i64 = id.parse().unwrap_or_default();
                match state.tabs.get(&id) {
                    Some(tabs) => ok(serde_json::to_value(tabs).unwrap()),
                    None => not_found(),
                }
            }
            (Method::Post, ["screens", screen, "tabs", tab, "fields"]) => {
                let screen: i64 = screen.parse().unwrap_or_default();
                let tab: i64 = tab.parse().unwrap_or_default();
                let field = body["fieldId"].as_str().unwrap_or_default().to_string();
                let placed = state.screen_fields.entry((screen, tab)).or_default();
                if placed.contains(&field) {
                    return bad_request(&format!("Field {} already exists on the screen.", field));
                }
                placed.push(field.clone());
                ok(json!({ "id": field, "name": field }))
            }

            _ => not_found(),
        }
    }

    fn create_issue(state: &mut FakeState, body: &Value) -> Response {
        let fields = body["fields"].as_object().cloned().unwrap_or_default();
        let project = fields
            .get("project")
            .and_then(|p| p["key"].as_str())
            .unwrap_or_default()
            .to_string();
        let issue_type = fields
            .get("issuetype")
            .and_then(|t| t["name"].as_str())
            .unwrap_or_default()
            .to_string();
        let summary = fields
            .get("summary")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if !state.projects.contains_key(&project) {
            return bad_request("project: valid project is required");
        }
        if !state.issue_types.iter().any(|t| t.name == issue_type) {
            return bad_request("issuetype: valid issue type is required");
        }
        let key = state.insert_issue(&project, &issue_type, &summary);
        let issue = state.issue_mut(&key).unwrap();
        for (name, value) in fields {
            match name.as_str() {
                "project" | "issuetype" | "summary" => {}
                "fixVersions" => {
                    issue.fix_versions = value
                        .as_array()
                        .map(|vs| {
                            vs.iter()
                                .filter_map(|v| v["name"].as_str().map(String::from))
                                .collect()
                        })
                        .unwrap_or_default();
                }
                _ => {
                    issue.fields.insert(name, value);
                }
            }
        }
        let id = issue.id;
        Response::new(201, json!({ "id": id.to_string(), "key": key }))
    }

    fn search(state: &FakeState, request: &Request) -> Response {
        let jql = request.query_value("jql").unwrap_or_default();
        let query = JqlQuery::parse(jql);
        let start: usize = request
            .query_value("startAt")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let max: usize = request
            .query_value("maxResults")
            .and_then(|v| v.parse().ok())
            .unwrap_or(50);
        let matching: Vec<&FakeIssue> = state.issues.iter().filter(|i| query.matches(i)).collect();
        let page: Vec<Value> = matching
            .iter()
            .skip(start)
            .take(max)
            .map(|i| i.to_json())
            .collect();
        ok(json!({
            "startAt": start,
            "maxResults": max,
            "total": matching.len(),
            "issues": page,
        }))
    }
}

impl Transport for FakeJira {
    fn execute(&mut self, request: &Request) -> TransportResult<Response> {
        let mut state = self.lock();
        state.requests.push(request.clone());
        Ok(Self::handle(&mut state, request))
    }
}

/// The subset of JQL the gateway emits.
#[derive(Debug, Default)]
struct JqlQuery {
    project: Option<String>,
    summary: Option<String>,
    issue_type: Option<String>,
    fix_version_empty: bool,
}

impl JqlQuery {
    fn parse(jql: &str) -> Self {
        let project = Regex::new(r#"project\s*=\s*"?([A-Za-z0-9_]+)"?"#).unwrap();
        let summary = Regex::new(r#"summary\s*~\s*"((?:[^"\\]|\\.)*)""#).unwrap();
        let issue_type = Regex::new(r#"issuetype\s*=\s*"([^"]+)""#).unwrap();
        JqlQuery {
            project: project.captures(jql).map(|c| c[1].to_string()),
            summary: summary.captures(jql).map(|c| c[1].replace("\\\"", "\"")),
            issue_type: issue_type.captures(jql).map(|c| c[1].to_string()),
            fix_version_empty: jql.contains("fixVersion is EMPTY"),
        }
    }

    /// `summary ~` is a text search; a contains match is close enough.
    fn matches(&self, issue: &FakeIssue) -> bool {
        self.project.as_ref().map_or(true, |p| &issue.project == p)
            && self.issue_type.as_ref().map_or(true, |t| &issue.issue_type == t)
            && self
                .summary
                .as_ref()
                .map_or(true, |s| issue.summary.to_lowercase().contains(&s.to_lowercase()))
            && (!self.fix_version_empty || issue.fix_versions.is_empty())
    }
}

pub fn transition_id(name: &str) -> String {
    let index = TRANSITIONS.iter().position(|t| t.name == name).unwrap_or(0);
    (11 + index * 10).to_string()
}

fn ok(body: Value) -> Response {
    Response::new(200, body)
}

fn no_content() -> Response {
    Response::new(204, Value::Null)
}

fn not_found() -> Response {
    Response::new(404, json!({ "errorMessages": ["Not found"] }))
}

fn bad_request(message: &str) -> Response {
    Response::new(400, json!({ "errorMessages": [message] }))
}
