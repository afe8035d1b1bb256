//! Manifest validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntax, the builder handles field shapes)
//! - Reject empty paths and paths carrying a query or hash (`:name?` segments are allowed)
//! - Reject empty and duplicate route names
//! - Check the configured log level
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: RouteManifest → Result<(), Vec<ValidationError>>

use std::collections::HashMap;
use std::fmt;

use crate::config::schema::RouteManifest;
use crate::routing::pattern::is_param_segment;
use crate::routing::prefab::RouteConfigPrefab;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A semantic problem found in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Where the problem is, e.g. `routes[1].children[0]`.
    pub location: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a parsed manifest.
pub fn validate_manifest(manifest: &RouteManifest) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let level = manifest.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError {
            location: "observability.log_level".to_string(),
            message: format!(
                "unknown level `{}` (expected one of {})",
                manifest.observability.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let mut names: HashMap<String, String> = HashMap::new();
    for (index, route) in manifest.routes.iter().enumerate() {
        check_route(route, format!("routes[{}]", index), &mut names, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_route(
    route: &RouteConfigPrefab,
    location: String,
    names: &mut HashMap<String, String>,
    errors: &mut Vec<ValidationError>,
) {
    if let Some(path) = route.path_str() {
        if path.is_empty() && !location.contains(".children") {
            errors.push(ValidationError {
                location: location.clone(),
                message: "top-level route path is empty".to_string(),
            });
        }
        if carries_query_or_hash(path) {
            errors.push(ValidationError {
                location: location.clone(),
                message: format!("path `{}` must not contain a query or hash", path),
            });
        }
    }

    if let Some(name) = &route.name {
        if name.trim().is_empty() {
            errors.push(ValidationError {
                location: location.clone(),
                message: "route name is empty".to_string(),
            });
        } else if let Some(first) = names.get(name) {
            errors.push(ValidationError {
                location: location.clone(),
                message: format!("route name `{}` already used at {}", name, first),
            });
        } else {
            names.insert(name.clone(), location.clone());
        }
    }

    for (index, child) in route.children.iter().enumerate() {
        check_route(child, format!("{}.children[{}]", location, index), names, errors);
    }
}

/// `?` is only allowed as the marker of an optional `:name?` segment.
fn carries_query_or_hash(path: &str) -> bool {
    path.contains('#')
        || path
            .split('/')
            .any(|segment| segment.contains('?') && !is_param_segment(segment))
}
