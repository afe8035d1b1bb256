//! Route config construction.
//!
//! # Responsibilities
//! - Validate the shape of every prefab field
//! - Normalize absent fields (`redirect` → none, `props` → disabled, `component` → none)
//! - Assign a fresh identity per construction
//!
//! # Design Decisions
//! - No partial construction: the first invalid field aborts the build
//! - Matcher artifacts start as placeholders; the external matcher owns them afterwards
//! - Tree links are left empty; wiring happens in `tree.rs`

use std::sync::Arc;

use serde_json::Value;

use crate::routing::error::{ConfigField, InvalidConfig};
use crate::routing::identity::{self, IdSource, RouteId};
use crate::routing::matcher::{NeverMatcher, PathMatcher};
use crate::routing::prefab::{Declared, RouteConfigPrefab};
use crate::routing::types::{Component, Generator, Meta, NamedTarget, Props, Redirect};

/// Canonical, validated route configuration.
#[derive(Debug)]
pub struct RouteConfig {
    pub(crate) id: RouteId,
    pub(crate) name: Option<String>,
    pub(crate) path: String,
    pub(crate) redirect: Option<Redirect>,
    pub(crate) component: Component,
    pub(crate) is_async: bool,
    pub(crate) meta: Arc<Meta>,
    pub(crate) props: Props,
    pub(crate) param_keys: Vec<String>,
    pub(crate) matcher: Arc<dyn PathMatcher>,
    pub(crate) generator: Generator,
    pub(crate) parent: Option<RouteId>,
    pub(crate) children: Vec<Arc<RouteConfig>>,
}

/// Output of the external pattern compiler for one config.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub param_keys: Vec<String>,
    pub matcher: Arc<dyn PathMatcher>,
    pub generator: Generator,
}

impl RouteConfig {
    pub fn id(&self) -> RouteId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        self.redirect.as_ref()
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    pub fn is_async(&self) -> bool {
        self.is_async
    }

    pub fn meta(&self) -> &Arc<Meta> {
        &self.meta
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn param_keys(&self) -> &[String] {
        &self.param_keys
    }

    pub fn matcher(&self) -> &dyn PathMatcher {
        self.matcher.as_ref()
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn parent(&self) -> Option<RouteId> {
        self.parent
    }

    pub fn children(&self) -> &[Arc<RouteConfig>] {
        &self.children
    }

    /// Install the matcher artifacts produced by the pattern compiler.
    pub fn install_pattern(&mut self, pattern: CompiledPattern) {
        self.param_keys = pattern.param_keys;
        self.matcher = pattern.matcher;
        self.generator = pattern.generator;
    }
}

/// Build a config using the process-wide identity source.
pub fn build_config(prefab: Option<&RouteConfigPrefab>) -> Result<RouteConfig, InvalidConfig> {
    build_config_with(prefab, identity::default_source())
}

/// Build a config drawing its identity from `ids`.
pub fn build_config_with(
    prefab: Option<&RouteConfigPrefab>,
    ids: &dyn IdSource,
) -> Result<RouteConfig, InvalidConfig> {
    let result = prefab
        .ok_or_else(|| InvalidConfig::new(ConfigField::Prefab, "is missing"))
        .and_then(|prefab| normalize(prefab, ids));

    match &result {
        Ok(config) => tracing::debug!(
            id = %config.id,
            path = %config.path,
            name = ?config.name,
            is_async = config.is_async,
            "Route config built"
        ),
        Err(err) => tracing::warn!(
            field = %err.field,
            reason = %err.reason,
            path = ?prefab.and_then(RouteConfigPrefab::path_str),
            "Rejected route prefab"
        ),
    }

    result
}

fn normalize(prefab: &RouteConfigPrefab, ids: &dyn IdSource) -> Result<RouteConfig, InvalidConfig> {
    let path = normalize_path(prefab.path.as_ref())?;
    let component = normalize_component(present(&prefab.component))?;
    let meta = normalize_meta(present(&prefab.meta))?;
    let redirect = normalize_redirect(present(&prefab.redirect))?;
    let props = normalize_props(present(&prefab.props))?;

    Ok(RouteConfig {
        id: ids.next_id(),
        name: prefab.name.clone(),
        path,
        redirect,
        is_async: component.is_async(),
        component,
        meta: Arc::new(meta),
        props,
        param_keys: Vec::new(),
        matcher: Arc::new(NeverMatcher),
        generator: Generator::empty(),
        parent: None,
        children: Vec::new(),
    })
}

fn present(field: &Option<Declared>) -> Option<&Declared> {
    field.as_ref().filter(|value| !value.is_null())
}

fn normalize_path(path: Option<&Declared>) -> Result<String, InvalidConfig> {
    match path {
        Some(Declared::Data(Value::String(path))) => Ok(path.clone()),
        None | Some(Declared::Data(Value::Null)) => {
            Err(InvalidConfig::new(ConfigField::Path, "is required"))
        }
        Some(other) => Err(InvalidConfig::new(
            ConfigField::Path,
            format!("must be a string, got {}", other.kind()),
        )),
    }
}

fn normalize_component(component: Option<&Declared>) -> Result<Component, InvalidConfig> {
    match component {
        None => Ok(Component::None),
        Some(Declared::Factory(f)) => Ok(Component::Factory(f.clone())),
        Some(Declared::Loader(loader)) => Ok(Component::Deferred(loader.clone())),
        Some(other) => Err(InvalidConfig::new(
            ConfigField::Component,
            format!(
                "must be a component factory or deferred loader, got {}",
                other.kind()
            ),
        )),
    }
}

fn normalize_meta(meta: Option<&Declared>) -> Result<Meta, InvalidConfig> {
    match meta {
        None => Ok(Meta::new()),
        Some(Declared::Data(Value::Object(map))) => Ok(map.clone()),
        Some(other) => Err(InvalidConfig::new(
            ConfigField::Meta,
            format!("must be a mapping, got {}", other.kind()),
        )),
    }
}

fn normalize_redirect(redirect: Option<&Declared>) -> Result<Option<Redirect>, InvalidConfig> {
    match redirect {
        None => Ok(None),
        Some(Declared::Data(Value::String(path))) => Ok(Some(Redirect::Path(path.clone()))),
        Some(Declared::Data(Value::Object(target))) => {
            Ok(Some(Redirect::Named(NamedTarget::from(target.clone()))))
        }
        Some(Declared::Redirect(f)) => Ok(Some(Redirect::Resolver(f.clone()))),
        Some(other) => Err(InvalidConfig::new(
            ConfigField::Redirect,
            format!(
                "must be a string, a target object or a redirect resolver, got {}",
                other.kind()
            ),
        )),
    }
}

fn normalize_props(props: Option<&Declared>) -> Result<Props, InvalidConfig> {
    match props {
        None | Some(Declared::Data(Value::Bool(false))) => Ok(Props::Disabled),
        Some(Declared::Data(Value::Bool(true))) => Ok(Props::Auto),
        Some(Declared::Data(Value::Object(map))) => Ok(Props::Static(Arc::new(map.clone()))),
        Some(Declared::Props(f)) => Ok(Props::Resolver(f.clone())),
        Some(other) => Err(InvalidConfig::new(
            ConfigField::Props,
            format!(
                "must be `true`, a mapping or a props resolver, got {}",
                other.kind()
            ),
        )),
    }
}
