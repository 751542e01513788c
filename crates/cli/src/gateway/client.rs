// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed operations over the Jira REST API.
//!
//! The gateway owns a [`Transport`] plus per-run caches of issue types,
//! custom fields, link types and projects. In preview mode every mutating
//! call is logged and skipped before it reaches the transport; reads still
//! run, so lookups report what a real run would find.

use std::collections::HashMap;

use jseed_core::{
    has_outward_link, CurrentUser, CustomFieldSpec, FieldRecord, FieldSchema, IssueRecord,
    IssueSpec, IssueTypeRecord, IssueTypeSpec, LinkTypeRecord, NamedRef, ProjectRecord,
    ProjectSpec, Screen, ScreenTab, TransitionRecord, VersionRecord, VersionSpec,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use super::ensure::{ensure, Ensured};
use super::transport::{HttpTransport, Request, Response, Transport, TransportError};
use crate::config::Config;

/// Fields requested by natural-key searches.
pub const SEARCH_FIELDS: &str = "summary,issuetype,status,fixVersions,issuelinks";

/// Page size of natural-key searches.
const FIND_PAGE: u32 = 100;

/// Error type for gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("{method} {path} returned HTTP {status}: {body}")]
    Status {
        method: &'static str,
        path: String,
        status: u16,
        body: String,
    },

    #[error("unexpected response from {path}: {reason}")]
    UnexpectedResponse { path: String, reason: String },

    #[error("link type not found: '{0}'\n  hint: check Administration > Issues > Issue Linking")]
    LinkTypeNotFound(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GatewayError {
    /// HTTP status of a rejected call, if that is what this error is.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// One page of `GET /search`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    #[serde(default)]
    pub start_at: u64,
    #[serde(default)]
    pub max_results: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub issues: Vec<IssueRecord>,
}

/// Result of placing a field on a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAttach {
    Added,
    AlreadyPresent,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScreenListing {
    List(Vec<Screen>),
    Page { values: Vec<Screen> },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkTypeListing {
    #[serde(default)]
    issue_link_types: Vec<LinkTypeRecord>,
}

#[derive(Deserialize)]
struct TransitionListing {
    #[serde(default)]
    transitions: Vec<TransitionRecord>,
}

/// Builds the natural-key JQL for an issue summary.
///
/// `summary ~` is a fuzzy text match, so callers still compare summaries
/// exactly on the results.
pub fn summary_jql(project: &str, summary: &str, issue_type: Option<&str>) -> String {
    let escaped = summary.replace('"', "\\\"");
    let mut jql = format!("project = {} AND summary ~ \"{}\"", project, escaped);
    if let Some(issue_type) = issue_type {
        jql.push_str(&format!(" AND issuetype = \"{}\"", issue_type));
    }
    jql
}

/// Jira returns ids as strings for most entities and as numbers for projects.
fn id_of(body: &Value) -> Option<String> {
    match body.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn decode<D: DeserializeOwned>(path: &str, value: Value) -> GatewayResult<D> {
    serde_json::from_value(value).map_err(|e| GatewayError::UnexpectedResponse {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

fn status_error(request: &Request, response: &Response) -> GatewayError {
    GatewayError::Status {
        method: request.method.as_str(),
        path: request.path.clone(),
        status: response.status,
        body: response.excerpt(),
    }
}

/// Client for the operations the seeding phases need.
pub struct Gateway<T: Transport = HttpTransport> {
    transport: T,
    preview: bool,
    parent_link_field: String,
    projects: HashMap<String, ProjectRecord>,
    issue_types: Option<Vec<IssueTypeRecord>>,
    fields: Option<Vec<FieldRecord>>,
    link_types: Option<Vec<LinkTypeRecord>>,
    preview_seq: u64,
}

impl Gateway<HttpTransport> {
    /// Creates a gateway talking HTTP to the configured instance.
    pub fn new(config: &Config, preview: bool) -> Self {
        let transport = HttpTransport::new(&config.base_url, &config.token, config.verify_tls);
        Self::with_transport(transport, config, preview)
    }
}

impl<T: Transport> Gateway<T> {
    /// Creates a gateway with a custom transport (for testing).
    pub fn with_transport(transport: T, config: &Config, preview: bool) -> Self {
        Gateway {
            transport,
            preview,
            parent_link_field: config.parent_link_field.clone(),
            projects: HashMap::new(),
            issue_types: None,
            fields: None,
            link_types: None,
            preview_seq: 0,
        }
    }

    pub fn is_preview(&self) -> bool {
        self.preview
    }

    fn next_preview_id(&mut self) -> u64 {
        self.preview_seq += 1;
        self.preview_seq
    }

    /// Sends a read. HTTP 404 folds into `None`.
    fn read(&mut self, request: Request) -> GatewayResult<Option<Value>> {
        let response = self.transport.execute(&request)?;
        if response.is_not_found() {
            debug!(path = %request.path, "not found");
            return Ok(None);
        }
        if !response.is_success() {
            return Err(status_error(&request, &response));
        }
        Ok(Some(response.body))
    }

    /// Sends a read whose target must exist.
    fn read_required(&mut self, request: Request) -> GatewayResult<Value> {
        let path = request.path.clone();
        self.read(request)?
            .ok_or_else(|| GatewayError::UnexpectedResponse {
                path,
                reason: "HTTP 404".to_string(),
            })
    }

    /// Sends a mutation and returns the raw response, whatever its status.
    /// `None` in preview mode, where nothing is sent.
    fn write_raw(&mut self, request: Request) -> GatewayResult<Option<(Request, Response)>> {
        if self.preview {
            info!(
                method = request.method.as_str(),
                path = %request.path,
                "dry-run: skipped"
            );
            return Ok(None);
        }
        let response = self.transport.execute(&request)?;
        Ok(Some((request, response)))
    }

    /// Sends a mutation. Any non-2xx status is an error.
    fn write(&mut self, request: Request) -> GatewayResult<Option<Value>> {
        let Some((request, response)) = self.write_raw(request)? else {
            return Ok(None);
        };
        if !response.is_success() {
            return Err(status_error(&request, &response));
        }
        Ok(Some(response.body))
    }

    // -- connection --------------------------------------------------------

    /// The account behind the configured token.
    pub fn myself(&mut self) -> GatewayResult<CurrentUser> {
        let body = self.read_required(Request::get("myself"))?;
        decode("myself", body)
    }

    // -- projects ----------------------------------------------------------

    pub fn project(&mut self, key: &str) -> GatewayResult<Option<ProjectRecord>> {
        if let Some(project) = self.projects.get(key) {
            return Ok(Some(project.clone()));
        }
        let path = format!("project/{}", key);
        let Some(body) = self.read(Request::get(&path))? else {
            return Ok(None);
        };
        let project: ProjectRecord = decode(&path, body)?;
        self.projects.insert(key.to_string(), project.clone());
        Ok(Some(project))
    }

    pub fn ensure_project(&mut self, spec: &ProjectSpec) -> GatewayResult<Ensured<ProjectRecord>> {
        ensure(self, |g| g.project(&spec.key), |g| g.create_project(spec))
    }

    fn create_project(&mut self, spec: &ProjectSpec) -> GatewayResult<ProjectRecord> {
        let body = json!({
            "key": spec.key,
            "name": spec.name,
            "description": spec.description,
            "lead": spec.lead,
            "projectTypeKey": spec.project_type,
        });
        let created = self.write(Request::post("project", body))?;
        let project = ProjectRecord {
            id: created.as_ref().and_then(id_of),
            key: spec.key.clone(),
            name: Some(spec.name.clone()),
        };
        info!(key = %spec.key, "created project");
        self.projects.insert(spec.key.clone(), project.clone());
        Ok(project)
    }

    pub fn delete_project(&mut self, key: &str) -> GatewayResult<()> {
        self.write(Request::delete(format!("project/{}", key)))?;
        self.projects.remove(key);
        info!(key, "deleted project");
        Ok(())
    }

    // -- issue types -------------------------------------------------------

    pub fn issue_types(&mut self) -> GatewayResult<&[IssueTypeRecord]> {
        if self.issue_types.is_none() {
            let body = self.read_required(Request::get("issuetype"))?;
            self.issue_types = Some(decode("issuetype", body)?);
        }
        Ok(self.issue_types.as_deref().unwrap_or_default())
    }

    pub fn issue_type(&mut self, name: &str) -> GatewayResult<Option<IssueTypeRecord>> {
        Ok(self
            .issue_types()?
            .iter()
            .find(|t| t.name == name)
            .cloned())
    }

    pub fn ensure_issue_type(
        &mut self,
        spec: &IssueTypeSpec,
    ) -> GatewayResult<Ensured<IssueTypeRecord>> {
        ensure(self, |g| g.issue_type(&spec.name), |g| g.create_issue_type(spec))
    }

    fn create_issue_type(&mut self, spec: &IssueTypeSpec) -> GatewayResult<IssueTypeRecord> {
        let body = json!({
            "name": spec.name,
            "description": spec.description,
            "type": spec.kind.as_str(),
        });
        let created = self.write(Request::post("issuetype", body))?;
        let record = IssueTypeRecord {
            id: created.as_ref().and_then(id_of),
            name: spec.name.clone(),
            description: Some(spec.description.clone()),
            subtask: spec.kind == jseed_core::IssueTypeKind::Subtask,
        };
        info!(name = %spec.name, "created issue type");
        if let Some(cache) = self.issue_types.as_mut() {
            cache.push(record.clone());
        }
        Ok(record)
    }

    // -- custom fields -----------------------------------------------------

    pub fn fields(&mut self) -> GatewayResult<&[FieldRecord]> {
        if self.fields.is_none() {
            let body = self.read_required(Request::get("field"))?;
            self.fields = Some(decode("field", body)?);
        }
        Ok(self.fields.as_deref().unwrap_or_default())
    }

    pub fn custom_field(&mut self, name: &str) -> GatewayResult<Option<FieldRecord>> {
        Ok(self
            .fields()?
            .iter()
            .find(|f| f.custom && f.name == name)
            .cloned())
    }

    pub fn ensure_custom_field(
        &mut self,
        spec: &CustomFieldSpec,
    ) -> GatewayResult<Ensured<FieldRecord>> {
        ensure(self, |g| g.custom_field(&spec.name), |g| g.create_custom_field(spec))
    }

    fn create_custom_field(&mut self, spec: &CustomFieldSpec) -> GatewayResult<FieldRecord> {
        let mut body = json!({
            "name": spec.name,
            "description": spec.description,
            "type": spec.kind.type_key(),
        });
        if let Some(searcher) = spec.kind.searcher_key() {
            body["searcherKey"] = json!(searcher);
        }
        let created = self.write(Request::post("field", body))?;
        let id = match created.as_ref().and_then(id_of) {
            Some(id) => id,
            None if self.preview => format!("customfield_preview_{}", self.next_preview_id()),
            None => {
                return Err(GatewayError::UnexpectedResponse {
                    path: "field".to_string(),
                    reason: "created field has no id".to_string(),
                })
            }
        };
        let record = FieldRecord {
            id,
            name: spec.name.clone(),
            custom: true,
            schema: Some(FieldSchema {
                value_type: None,
                custom: Some(spec.kind.type_key()),
            }),
        };
        info!(name = %spec.name, id = %record.id, "created custom field");
        if let Some(cache) = self.fields.as_mut() {
            cache.push(record.clone());
        }
        Ok(record)
    }

    // -- versions ----------------------------------------------------------

    pub fn versions(&mut self, project: &str) -> GatewayResult<Vec<VersionRecord>> {
        let path = format!("project/{}/versions", project);
        match self.read(Request::get(&path))? {
            Some(body) => decode(&path, body),
            None => Ok(Vec::new()),
        }
    }

    pub fn version(&mut self, project: &str, name: &str) -> GatewayResult<Option<VersionRecord>> {
        Ok(self
            .versions(project)?
            .into_iter()
            .find(|v| v.name == name))
    }

    pub fn ensure_version(&mut self, spec: &VersionSpec) -> GatewayResult<Ensured<VersionRecord>> {
        ensure(
            self,
            |g| g.version(&spec.project, &spec.name),
            |g| g.create_version(spec),
        )
    }

    fn create_version(&mut self, spec: &VersionSpec) -> GatewayResult<VersionRecord> {
        let mut body = json!({
            "name": spec.name,
            "project": spec.project,
            "description": spec.description,
            "released": spec.released,
        });
        if let Some(start) = spec.start_date {
            body["startDate"] = json!(start.to_string());
        }
        if let Some(release) = spec.release_date {
            body["releaseDate"] = json!(release.to_string());
        }
        let created = self.write(Request::post("version", body))?;
        info!(project = %spec.project, name = %spec.name, "created version");
        Ok(VersionRecord {
            id: created.as_ref().and_then(id_of),
            name: spec.name.clone(),
            released: spec.released,
            release_date: spec.release_date,
        })
    }

    // -- issues ------------------------------------------------------------

    /// One page of a JQL search.
    pub fn search(
        &mut self,
        jql: &str,
        fields: &str,
        max_results: u32,
        start_at: u64,
    ) -> GatewayResult<SearchPage> {
        let request = Request::get("search")
            .with_query("jql", jql)
            .with_query("fields", fields)
            .with_query("maxResults", max_results)
            .with_query("startAt", start_at);
        match self.read(request)? {
            Some(body) => decode("search", body),
            None => Ok(SearchPage::default()),
        }
    }

    /// First issue in `project` whose summary equals `summary` exactly.
    ///
    /// `summary ~` is a text search, so every page of fuzzy matches is read
    /// until the exact one turns up.
    pub fn find_issue(
        &mut self,
        project: &str,
        summary: &str,
        issue_type: Option<&str>,
    ) -> GatewayResult<Option<IssueRecord>> {
        let jql = summary_jql(project, summary, issue_type);
        let mut start_at = 0u64;
        loop {
            let page = self.search(&jql, SEARCH_FIELDS, FIND_PAGE, start_at)?;
            let read = page.issues.len() as u64;
            if read == 0 {
                return Ok(None);
            }
            if let Some(issue) = page.issues.into_iter().find(|i| i.summary() == summary) {
                return Ok(Some(issue));
            }
            start_at += read;
            if start_at >= page.total {
                return Ok(None);
            }
        }
    }

    pub fn ensure_issue(&mut self, spec: &IssueSpec) -> GatewayResult<Ensured<IssueRecord>> {
        ensure(
            self,
            |g| g.find_issue(&spec.project, &spec.summary, Some(&spec.issue_type)),
            |g| g.create_issue(spec),
        )
    }

    fn issue_fields(&mut self, spec: &IssueSpec) -> GatewayResult<Map<String, Value>> {
        let mut fields = Map::new();
        fields.insert("project".into(), json!({ "key": spec.project }));
        fields.insert("summary".into(), json!(spec.summary));
        fields.insert("issuetype".into(), json!({ "name": spec.issue_type }));
        if let Some(description) = &spec.description {
            fields.insert("description".into(), json!(description));
        }
        if let Some(parent) = &spec.parent {
            fields.insert(self.parent_link_field.clone(), json!(parent));
        }
        if !spec.fix_versions.is_empty() {
            let versions: Vec<_> = spec.fix_versions.iter().map(NamedRef::new).collect();
            fields.insert("fixVersions".into(), serde_json::to_value(versions)?);
        }
        if !spec.labels.is_empty() {
            fields.insert("labels".into(), json!(spec.labels));
        }
        for (name, value) in &spec.custom_fields {
            let Some(field) = self.custom_field(name)? else {
                warn!(field = %name, summary = %spec.summary, "custom field not found, value dropped");
                continue;
            };
            let value = if field.is_select() {
                json!({ "value": value })
            } else {
                json!(value)
            };
            fields.insert(field.id, value);
        }
        Ok(fields)
    }

    fn create_issue(&mut self, spec: &IssueSpec) -> GatewayResult<IssueRecord> {
        let fields = self.issue_fields(spec)?;
        let created = self.write(Request::post("issue", json!({ "fields": fields })))?;
        let record = match created {
            Some(body) => {
                let created: IssueRecord = decode("issue", body)?;
                IssueRecord::from_spec(created.key, created.id, spec)
            }
            None => {
                let key = format!("{}-PREVIEW-{}", spec.project, self.next_preview_id());
                IssueRecord::from_spec(key, None, spec)
            }
        };
        info!(
            key = %record.key,
            issue_type = %spec.issue_type,
            summary = %spec.summary,
            "created issue"
        );
        Ok(record)
    }

    /// Replaces the given fields of an issue.
    pub fn update_issue(&mut self, key: &str, fields: Value) -> GatewayResult<()> {
        self.write(Request::put(
            format!("issue/{}", key),
            json!({ "fields": fields }),
        ))?;
        Ok(())
    }

    pub fn set_fix_version(&mut self, key: &str, version: &str) -> GatewayResult<()> {
        self.update_issue(key, json!({ "fixVersions": [{ "name": version }] }))?;
        info!(key, version, "set fix version");
        Ok(())
    }

    /// Deletes an issue together with its sub-tasks.
    pub fn delete_issue(&mut self, key: &str) -> GatewayResult<()> {
        self.write(Request::delete(format!("issue/{}", key)).with_query("deleteSubtasks", true))?;
        debug!(key, "deleted issue");
        Ok(())
    }

    // -- links -------------------------------------------------------------

    pub fn link_type(&mut self, name: &str) -> GatewayResult<LinkTypeRecord> {
        if self.link_types.is_none() {
            let body = self.read_required(Request::get("issueLinkType"))?;
            let listing: LinkTypeListing = decode("issueLinkType", body)?;
            self.link_types = Some(listing.issue_link_types);
        }
        self.link_types
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|t| t.name == name)
            .cloned()
            .ok_or_else(|| GatewayError::LinkTypeNotFound(name.to_string()))
    }

    /// Links `outward` to `inward`: for Blocks, `outward` blocks `inward`.
    pub fn create_link(&mut self, link_type: &str, inward: &str, outward: &str) -> GatewayResult<()> {
        let resolved = self.link_type(link_type)?;
        let body = json!({
            "type": { "name": resolved.name },
            "inwardIssue": { "key": inward },
            "outwardIssue": { "key": outward },
        });
        self.write(Request::post("issueLink", body))?;
        info!(outward, inward, link_type, "created link");
        Ok(())
    }

    /// True when `from` already has an outward `link_type` link to `to`.
    pub fn has_link(&mut self, from: &str, link_type: &str, to: &str) -> GatewayResult<bool> {
        let path = format!("issue/{}", from);
        let Some(body) = self.read(Request::get(&path).with_query("fields", "issuelinks"))? else {
            return Ok(false);
        };
        let issue: IssueRecord = decode(&path, body)?;
        Ok(has_outward_link(&issue.fields.issuelinks, link_type, to))
    }

    // -- workflow ----------------------------------------------------------

    pub fn statuses(&mut self) -> GatewayResult<Vec<NamedRef>> {
        let body = self.read_required(Request::get("status"))?;
        decode("status", body)
    }

    pub fn transitions(&mut self, key: &str) -> GatewayResult<Vec<TransitionRecord>> {
        let path = format!("issue/{}/transitions", key);
        let body = self.read_required(Request::get(&path))?;
        let listing: TransitionListing = decode(&path, body)?;
        Ok(listing.transitions)
    }

    /// Executes the transition called `name` on `key`.
    ///
    /// Returns `false` (with a warning) when the issue offers no such
    /// transition.
    pub fn execute_transition(&mut self, key: &str, name: &str) -> GatewayResult<bool> {
        if self.preview {
            info!(key, transition = name, "dry-run: skipped transition");
            return Ok(true);
        }
        let available = self.transitions(key)?;
        let Some(transition) = available.iter().find(|t| t.name == name) else {
            warn!(key, transition = name, "transition not available");
            return Ok(false);
        };
        let body = json!({ "transition": { "id": transition.id } });
        self.write(Request::post(format!("issue/{}/transitions", key), body))?;
        info!(key, transition = name, "transitioned issue");
        Ok(true)
    }

    // -- screens -----------------------------------------------------------

    pub fn screens(&mut self) -> GatewayResult<Vec<Screen>> {
        let body = self.read_required(Request::get("screens"))?;
        let listing: ScreenListing = decode("screens", body)?;
        Ok(match listing {
            ScreenListing::List(screens) => screens,
            ScreenListing::Page { values } => values,
        })
    }

    /// Screens named after a project (`KEY: ...`).
    pub fn project_screens(&mut self, project: &str) -> GatewayResult<Vec<Screen>> {
        let prefix = format!("{}:", project);
        Ok(self
            .screens()?
            .into_iter()
            .filter(|s| s.name.starts_with(&prefix))
            .collect())
    }

    pub fn screen_tabs(&mut self, screen: i64) -> GatewayResult<Vec<ScreenTab>> {
        let path = format!("screens/{}/tabs", screen);
        match self.read(Request::get(&path))? {
            Some(body) => decode(&path, body),
            None => Ok(Vec::new()),
        }
    }

    /// Places `field_id` on the first tab of `screen`.
    pub fn add_field_to_screen(&mut self, screen: i64, field_id: &str) -> GatewayResult<ScreenAttach> {
        let tabs = self.screen_tabs(screen)?;
        let Some(tab) = tabs.first() else {
            return Err(GatewayError::UnexpectedResponse {
                path: format!("screens/{}/tabs", screen),
                reason: "screen has no tabs".to_string(),
            });
        };
        let request = Request::post(
            format!("screens/{}/tabs/{}/fields", screen, tab.id),
            json!({ "fieldId": field_id }),
        );
        let Some((request, response)) = self.write_raw(request)? else {
            return Ok(ScreenAttach::Added);
        };
        if response.is_success() {
            info!(screen, field = field_id, "added field to screen");
            return Ok(ScreenAttach::Added);
        }
        if response.status == 400 && response.excerpt().to_lowercase().contains("already") {
            debug!(screen, field = field_id, "field already on screen");
            return Ok(ScreenAttach::AlreadyPresent);
        }
        Err(status_error(&request, &response))
    }
}
