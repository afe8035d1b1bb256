//! The public "current route" snapshot.
//!
//! # Responsibilities
//! - Describe the navigation location handed over by the history layer
//! - Project the leaf record onto the route (`name`, `params`, `meta`, `redirect`)
//! - Reconstruct `full_path` from path, query and hash
//!
//! # Design Decisions
//! - The leaf (last matched record) is authoritative
//! - No validation beyond structural copying; the matcher owns resolution
//! - Query keys are serialized in mapping order, form-urlencoded

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::routing::record::Record;
use crate::routing::types::{Meta, Params, Redirect};

/// How a navigation was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    Push,
    Replace,
    Pop,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Push => "push",
            Action::Replace => "replace",
            Action::Pop => "pop",
        })
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "push" => Ok(Action::Push),
            "replace" => Ok(Action::Replace),
            "pop" => Ok(Action::Pop),
            other => Err(format!("unknown navigation action `{}`", other)),
        }
    }
}

/// Navigation location as parsed by the history layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    /// URL path without query or hash.
    pub path: String,
    /// Fragment, with or without the leading `#`.
    pub hash: String,
    /// Parsed query, in URL order.
    pub query: Map<String, Value>,
    pub action: Action,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }
}

/// The resolved route of one navigation.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub(crate) name: Option<String>,
    pub(crate) path: String,
    pub(crate) hash: String,
    pub(crate) full_path: String,
    pub(crate) query: Map<String, Value>,
    pub(crate) params: Params,
    pub(crate) meta: Arc<Meta>,
    pub(crate) redirect: Option<Redirect>,
    pub(crate) action: Action,
    pub(crate) matched: Vec<Record>,
}

impl Route {
    /// Empty "no route yet" marker.
    pub(crate) fn placeholder() -> Self {
        Self {
            name: None,
            path: String::new(),
            hash: String::new(),
            full_path: String::new(),
            query: Map::new(),
            params: Params::new(),
            meta: Arc::new(Meta::new()),
            redirect: None,
            action: Action::default(),
            matched: Vec::new(),
        }
    }

    /// True for the placeholder produced when there is no route yet.
    pub fn is_placeholder(&self) -> bool {
        self.matched.is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn query(&self) -> &Map<String, Value> {
        &self.query
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn meta(&self) -> &Arc<Meta> {
        &self.meta
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        self.redirect.as_ref()
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn matched(&self) -> &[Record] {
        &self.matched
    }

    /// The resolved leaf record.
    pub fn leaf(&self) -> Option<&Record> {
        self.matched.last()
    }
}

/// Assemble the route snapshot from a location and the matched record stack.
pub fn build_route(location: &Location, matched: Vec<Record>) -> Route {
    let (name, params, meta, redirect) = match matched.last() {
        Some(leaf) => (
            leaf.data.name.clone(),
            leaf.data.params.clone(),
            Arc::clone(&leaf.attachments.meta),
            leaf.attachments.redirect.clone(),
        ),
        None => {
            tracing::warn!(path = %location.path, "Assembling a route without matched records");
            (None, Params::new(), Arc::new(Meta::new()), None)
        }
    };

    let full_path = compose_full_path(&location.path, &location.query, &location.hash);

    tracing::debug!(
        full_path = %full_path,
        name = ?name,
        action = %location.action,
        depth = matched.len(),
        "Route assembled"
    );

    Route {
        name,
        path: location.path.clone(),
        hash: location.hash.clone(),
        full_path,
        query: location.query.clone(),
        params,
        meta,
        redirect,
        action: location.action,
        matched,
    }
}

/// Join path, query and hash into one URL string.
pub fn compose_full_path(path: &str, query: &Map<String, Value>, hash: &str) -> String {
    let mut full = path.to_string();

    let query = stringify_query(query);
    if !query.is_empty() {
        full.push('?');
        full.push_str(&query);
    }

    let hash = hash.strip_prefix('#').unwrap_or(hash);
    if !hash.is_empty() {
        full.push('#');
        full.push_str(hash);
    }

    full
}

/// Serialize a query mapping. Arrays repeat the key for each non-null element;
/// a top-level `null` yields a bare key.
pub fn stringify_query(query: &Map<String, Value>) -> String {
    let mut pairs = Vec::with_capacity(query.len());
    for (key, value) in query {
        match value {
            Value::Array(items) => {
                for item in items.iter().filter(|item| !item.is_null()) {
                    pairs.push(query_pair(key, item));
                }
            }
            other => pairs.push(query_pair(key, other)),
        }
    }
    pairs.join("&")
}

fn query_pair(key: &str, value: &Value) -> String {
    let key = encode(key);
    match value {
        Value::Null => key,
        Value::String(s) => format!("{}={}", key, encode(s)),
        other => format!("{}={}", key, encode(&other.to_string())),
    }
}

fn encode(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}
