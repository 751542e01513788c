// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for the Jira REST API.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTP calls through `ureq` for production
//! - In-memory fakes for unit testing
//!
//! A transport only moves requests and responses. Status handling, preview
//! mode and decoding belong to the [`Gateway`](super::Gateway).

use serde_json::Value;
use tracing::debug;
use ureq::tls::TlsConfig;
use ureq::Agent;

/// Path prefix of every REST call.
pub const API_ROOT: &str = "/rest/api/2";

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or no response arrived.
    #[error("request failed: {0}")]
    Request(String),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// True for every method that changes tracker state.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Method::Get)
    }
}

/// A REST call relative to [`API_ROOT`].
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Path below the API root, without a leading slash (`issue/DEVEX-1`).
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Request {
    fn new(method: Method, path: impl Into<String>, body: Option<Value>) -> Self {
        Request {
            method,
            path: path.into(),
            query: Vec::new(),
            body,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path, None)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path, Some(body))
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, path, Some(body))
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path, None)
    }

    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Value of the first query parameter named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A response with its body parsed as JSON.
///
/// Empty bodies become `Value::Null`; bodies that are not JSON are kept as a
/// `Value::String`.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    pub fn new(status: u16, body: Value) -> Self {
        Response { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Body text for error messages, cut to a readable length.
    pub fn excerpt(&self) -> String {
        const LIMIT: usize = 300;
        let text = match &self.body {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        };
        if text.chars().count() > LIMIT {
            let cut: String = text.chars().take(LIMIT).collect();
            format!("{}...", cut)
        } else {
            text
        }
    }
}

/// Parses a response body.
pub fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Transport trait for request/response communication with Jira.
///
/// Implementations return every HTTP status as a [`Response`]; only failures
/// to communicate at all are errors.
pub trait Transport {
    fn execute(&mut self, request: &Request) -> TransportResult<Response>;
}

/// Blocking HTTP transport with bearer-token authentication.
pub struct HttpTransport {
    agent: Agent,
    base_url: String,
    authorization: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, token: &str, verify_tls: bool) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .tls_config(
                TlsConfig::builder()
                    .disable_verification(!verify_tls)
                    .build(),
            )
            .build();
        HttpTransport {
            agent: Agent::new_with_config(config),
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization: format!("Bearer {}", token),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}/{}", self.base_url, API_ROOT, path.trim_start_matches('/'))
    }
}

impl Transport for HttpTransport {
    fn execute(&mut self, request: &Request) -> TransportResult<Response> {
        let url = self.url(&request.path);
        debug!(method = request.method.as_str(), %url, "jira request");

        let result = match request.method {
            Method::Get | Method::Delete => {
                let mut builder = if request.method == Method::Get {
                    self.agent.get(&url)
                } else {
                    self.agent.delete(&url)
                };
                for (key, value) in &request.query {
                    builder = builder.query(key, value);
                }
                builder
                    .header("Authorization", self.authorization.as_str())
                    .header("Accept", "application/json")
                    .call()
            }
            Method::Post | Method::Put => {
                let mut builder = if request.method == Method::Post {
                    self.agent.post(&url)
                } else {
                    self.agent.put(&url)
                };
                for (key, value) in &request.query {
                    builder = builder.query(key, value);
                }
                let builder = builder
                    .header("Authorization", self.authorization.as_str())
                    .header("Accept", "application/json");
                match &request.body {
                    Some(body) => builder.send_json(body),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| TransportError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Body(e.to_string()))?;
        debug!(status, bytes = text.len(), "jira response");

        Ok(Response::new(status, parse_body(&text)))
    }
}
