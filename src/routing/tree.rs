//! Route tree assembly.
//!
//! # Responsibilities
//! - Build every declared prefab through the config builder
//! - Wire `parent` / `children` links
//! - Hand full patterns to the pattern compiler, when one is supplied
//! - Look up configs by id or name and produce matched stacks
//!
//! # Design Decisions
//! - Children are built before their parent is frozen, so links are acyclic
//! - Immutable after assembly (shared without locks)
//! - Duplicate names: first declaration wins

use std::collections::HashMap;
use std::sync::Arc;

use crate::routing::builder::{build_config_with, RouteConfig};
use crate::routing::error::InvalidConfig;
use crate::routing::identity::{self, IdSource, RouteId};
use crate::routing::pattern::PatternCompiler;
use crate::routing::prefab::RouteConfigPrefab;

/// An assembled, read-only tree of route configs.
#[derive(Debug, Default)]
pub struct RouteTree {
    roots: Vec<Arc<RouteConfig>>,
    by_id: HashMap<RouteId, Arc<RouteConfig>>,
    by_name: HashMap<String, RouteId>,
    patterns: HashMap<RouteId, String>,
}

impl RouteTree {
    /// Assemble with the default identity source and no pattern compiler.
    pub fn assemble(prefabs: &[RouteConfigPrefab]) -> Result<Self, InvalidConfig> {
        Self::assemble_with(prefabs, identity::default_source(), None)
    }

    pub fn assemble_with(
        prefabs: &[RouteConfigPrefab],
        ids: &dyn IdSource,
        compiler: Option<&dyn PatternCompiler>,
    ) -> Result<Self, InvalidConfig> {
        let mut tree = Self::default();
        for prefab in prefabs {
            let root = tree.wire(prefab, None, ids, compiler)?;
            tree.roots.push(root);
        }

        tracing::info!(
            roots = tree.roots.len(),
            routes = tree.by_id.len(),
            named = tree.by_name.len(),
            "Route tree assembled"
        );
        Ok(tree)
    }

    fn wire(
        &mut self,
        prefab: &RouteConfigPrefab,
        parent: Option<(RouteId, &str)>,
        ids: &dyn IdSource,
        compiler: Option<&dyn PatternCompiler>,
    ) -> Result<Arc<RouteConfig>, InvalidConfig> {
        let mut config = build_config_with(Some(prefab), ids)?;
        config.parent = parent.map(|(id, _)| id);

        let pattern = join_pattern(parent.map(|(_, pattern)| pattern), &config.path);
        if let Some(compiler) = compiler {
            config.install_pattern(compiler.compile(&pattern));
        }

        // Names are claimed in declaration order, before any descendant.
        if let Some(name) = &config.name {
            if self.by_name.contains_key(name) {
                tracing::warn!(name = %name, path = %pattern, "Duplicate route name ignored");
            } else {
                self.by_name.insert(name.clone(), config.id);
            }
        }

        for child in &prefab.children {
            let child = self.wire(child, Some((config.id, pattern.as_str())), ids, compiler)?;
            config.children.push(child);
        }

        let config = Arc::new(config);
        self.patterns.insert(config.id, pattern);
        self.by_id.insert(config.id, Arc::clone(&config));
        Ok(config)
    }

    pub fn roots(&self) -> &[Arc<RouteConfig>] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn get(&self, id: RouteId) -> Option<&Arc<RouteConfig>> {
        self.by_id.get(&id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Arc<RouteConfig>> {
        self.by_name.get(name).and_then(|id| self.by_id.get(id))
    }

    /// Full pattern (parent paths joined) of a config.
    pub fn full_pattern(&self, id: RouteId) -> Option<&str> {
        self.patterns.get(&id).map(String::as_str)
    }

    /// Matched stack for a config: outermost ancestor first, the config last.
    pub fn ancestry(&self, id: RouteId) -> Vec<Arc<RouteConfig>> {
        let mut stack = Vec::new();
        let mut current = self.by_id.get(&id);
        while let Some(config) = current {
            stack.push(Arc::clone(config));
            current = config.parent.and_then(|parent| self.by_id.get(&parent));
        }
        stack.reverse();
        stack
    }

    /// Depth-first, pre-order walk with each config's depth.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Arc<RouteConfig>)> + '_ {
        let mut pending: Vec<(usize, &Arc<RouteConfig>)> =
            self.roots.iter().rev().map(|root| (0, root)).collect();
        std::iter::from_fn(move || {
            let (depth, config) = pending.pop()?;
            pending.extend(config.children.iter().rev().map(|child| (depth + 1, child)));
            Some((depth, config))
        })
    }
}

fn join_pattern(parent: Option<&str>, path: &str) -> String {
    if path.starts_with('/') {
        return path.to_string();
    }
    match parent {
        None => format!("/{}", path),
        Some(parent) if path.is_empty() => parent.to_string(),
        Some(parent) => format!("{}/{}", parent.trim_end_matches('/'), path),
    }
}
