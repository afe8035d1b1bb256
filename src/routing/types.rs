//! Route value types shared by the builder, record factory and assembler.
//!
//! # Responsibilities
//! - Closed variants for the polymorphic `redirect`, `props` and `component` fields
//! - Identity-preserving callback handles
//! - Coerced parameter values
//!
//! # Design Decisions
//! - Callbacks are shared through `Arc`; cloning a handle never re-creates the closure
//! - Callback equality is pointer identity
//! - Each polymorphic field owns its resolution operation

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use futures_util::future::{self, BoxFuture, FutureExt};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::routing::route::Route;

/// Opaque handle to a UI component produced by a factory or loader.
pub type ComponentHandle = Arc<dyn Any + Send + Sync>;

/// Read-only descriptive data attached to a route.
pub type Meta = Map<String, Value>;

/// Resolved route parameters keyed by name.
pub type Params = BTreeMap<String, ParamValue>;

/// A shared callback. Clones point at the same closure.
pub struct Callback<F: ?Sized>(Arc<F>);

impl<F: ?Sized> Callback<F> {
    /// Returns true if both handles refer to the same closure.
    pub fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<F: ?Sized> Clone for Callback<F> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<F: ?Sized> PartialEq for Callback<F> {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<F: ?Sized> fmt::Debug for Callback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Arc::as_ptr(&self.0))
    }
}

impl<F: ?Sized> Serialize for Callback<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("[callback]")
    }
}

/// Computes a redirect target from the route being navigated to.
pub type RedirectFn = Callback<dyn Fn(&Route) -> RedirectTarget + Send + Sync>;

/// Computes component props from the resolved route.
pub type PropsFn = Callback<dyn Fn(&Route) -> Map<String, Value> + Send + Sync>;

/// Produces a component immediately.
pub type ComponentFactory = Callback<dyn Fn() -> ComponentHandle + Send + Sync>;

/// Produces a component once its deferred load completes.
pub type ComponentLoader = Callback<dyn Fn() -> BoxFuture<'static, ComponentHandle> + Send + Sync>;

/// Rebuilds a URL path from resolved parameters.
pub type Generator = Callback<dyn Fn(&Params) -> String + Send + Sync>;

impl Callback<dyn Fn(&Route) -> RedirectTarget + Send + Sync> {
    pub fn new(f: impl Fn(&Route) -> RedirectTarget + Send + Sync + 'static) -> Self {
        let f: Arc<dyn Fn(&Route) -> RedirectTarget + Send + Sync> = Arc::new(f);
        Self(f)
    }

    pub fn call(&self, route: &Route) -> RedirectTarget {
        (self.0)(route)
    }
}

impl Callback<dyn Fn(&Route) -> Map<String, Value> + Send + Sync> {
    pub fn new(f: impl Fn(&Route) -> Map<String, Value> + Send + Sync + 'static) -> Self {
        let f: Arc<dyn Fn(&Route) -> Map<String, Value> + Send + Sync> = Arc::new(f);
        Self(f)
    }

    pub fn call(&self, route: &Route) -> Map<String, Value> {
        (self.0)(route)
    }
}

impl Callback<dyn Fn() -> ComponentHandle + Send + Sync> {
    pub fn new(f: impl Fn() -> ComponentHandle + Send + Sync + 'static) -> Self {
        let f: Arc<dyn Fn() -> ComponentHandle + Send + Sync> = Arc::new(f);
        Self(f)
    }

    pub fn call(&self) -> ComponentHandle {
        (self.0)()
    }
}

impl Callback<dyn Fn() -> BoxFuture<'static, ComponentHandle> + Send + Sync> {
    pub fn new(f: impl Fn() -> BoxFuture<'static, ComponentHandle> + Send + Sync + 'static) -> Self {
        let f: Arc<dyn Fn() -> BoxFuture<'static, ComponentHandle> + Send + Sync> = Arc::new(f);
        Self(f)
    }

    pub fn call(&self) -> BoxFuture<'static, ComponentHandle> {
        (self.0)()
    }
}

impl Callback<dyn Fn(&Params) -> String + Send + Sync> {
    pub fn new(f: impl Fn(&Params) -> String + Send + Sync + 'static) -> Self {
        let f: Arc<dyn Fn(&Params) -> String + Send + Sync> = Arc::new(f);
        Self(f)
    }

    /// Generator installed on configs that have no compiled pattern yet.
    pub fn empty() -> Self {
        Self::new(|_| String::new())
    }

    pub fn generate(&self, params: &Params) -> String {
        (self.0)(params)
    }
}

/// Where a redirect sends the navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RedirectTarget {
    /// A URL string.
    Path(String),
    /// A reference to a named route (or a path) with parameters.
    Named(NamedTarget),
}

/// Location object form of a redirect.
///
/// Kept exactly as declared: unknown keys and unusual value types survive
/// normalization and serialization. The accessors read the well-known keys.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamedTarget(Map<String, Value>);

impl NamedTarget {
    /// Target referring to a route by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::default().with("name", Value::String(name.into()))
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn path(&self) -> Option<&str> {
        self.0.get("path").and_then(Value::as_str)
    }

    pub fn params(&self) -> Option<&Map<String, Value>> {
        self.0.get("params").and_then(Value::as_object)
    }

    pub fn query(&self) -> Option<&Map<String, Value>> {
        self.0.get("query").and_then(Value::as_object)
    }

    pub fn hash(&self) -> Option<&str> {
        self.0.get("hash").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for NamedTarget {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Normalized redirect of a route config.
#[derive(Debug, Clone, PartialEq)]
pub enum Redirect {
    Path(String),
    Named(NamedTarget),
    Resolver(RedirectFn),
}

impl Redirect {
    /// Resolve the redirect against the route being navigated to.
    pub fn resolve(&self, to: &Route) -> RedirectTarget {
        match self {
            Redirect::Path(path) => RedirectTarget::Path(path.clone()),
            Redirect::Named(target) => RedirectTarget::Named(target.clone()),
            Redirect::Resolver(f) => f.call(to),
        }
    }
}

impl Serialize for Redirect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Redirect::Path(path) => serializer.serialize_str(path),
            Redirect::Named(target) => target.serialize(serializer),
            Redirect::Resolver(f) => f.serialize(serializer),
        }
    }
}

/// Normalized props declaration.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Props {
    /// No props are passed (`false`).
    #[default]
    Disabled,
    /// Route params are passed as props (`true`).
    Auto,
    Static(Arc<Map<String, Value>>),
    Resolver(PropsFn),
}

impl Props {
    /// Props for the component rendered at `route`, if any.
    pub fn resolve(&self, route: &Route) -> Option<Map<String, Value>> {
        match self {
            Props::Disabled => None,
            Props::Auto => Some(params_to_json(route.params())),
            Props::Static(props) => Some(props.as_ref().clone()),
            Props::Resolver(f) => Some(f.call(route)),
        }
    }
}

impl Serialize for Props {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Props::Disabled => serializer.serialize_bool(false),
            Props::Auto => serializer.serialize_bool(true),
            Props::Static(props) => props.as_ref().serialize(serializer),
            Props::Resolver(f) => f.serialize(serializer),
        }
    }
}

/// Normalized component declaration.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Component {
    /// Config-only route (redirects, grouping).
    #[default]
    None,
    Factory(ComponentFactory),
    Deferred(ComponentLoader),
}

impl Component {
    pub fn is_async(&self) -> bool {
        matches!(self, Component::Deferred(_))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Component::None)
    }

    /// Start loading the component. Factories resolve immediately.
    pub fn load(&self) -> Option<BoxFuture<'static, ComponentHandle>> {
        match self {
            Component::None => None,
            Component::Factory(f) => Some(future::ready(f.call()).boxed()),
            Component::Deferred(loader) => Some(loader.call()),
        }
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Component::None => serializer.serialize_bool(false),
            Component::Factory(_) => serializer.serialize_str("[factory]"),
            Component::Deferred(_) => serializer.serialize_str("[deferred]"),
        }
    }
}

/// A route parameter after coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(n) => Some(*n as f64),
            ParamValue::Float(n) => Some(*n),
            ParamValue::Str(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::Int(n) => Value::from(*n),
            ParamValue::Float(n) => Value::from(*n),
            ParamValue::Str(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Float(n) => write!(f, "{:?}", n),
            ParamValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Float(n)
    }
}

/// JSON view of resolved params (used for `props: true`).
pub fn params_to_json(params: &Params) -> Map<String, Value> {
    params
        .iter()
        .map(|(key, value)| (key.clone(), value.to_json()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use serde_json::json;

    #[test]
    fn test_callback_identity() {
        let f = ComponentFactory::new(|| Arc::new("home") as ComponentHandle);
        let same = f.clone();
        let other = ComponentFactory::new(|| Arc::new("home") as ComponentHandle);

        assert!(f.same(&same));
        assert_eq!(f, same);
        assert!(!f.same(&other));
    }

    #[test]
    fn test_component_load() {
        let factory = Component::Factory(ComponentFactory::new(|| Arc::new(7u32) as ComponentHandle));
        let handle = factory.load().unwrap().now_or_never().unwrap();
        assert_eq!(handle.downcast_ref::<u32>(), Some(&7));
        assert!(!factory.is_async());

        let deferred = Component::Deferred(ComponentLoader::new(|| {
            async { Arc::new("lazy") as ComponentHandle }.boxed()
        }));
        assert!(deferred.is_async());
        let handle = deferred.load().unwrap().now_or_never().unwrap();
        assert_eq!(handle.downcast_ref::<&str>(), Some(&"lazy"));

        assert!(Component::None.load().is_none());
    }

    #[test]
    fn test_serialize_markers() {
        assert_eq!(serde_json::to_value(Props::Disabled).unwrap(), json!(false));
        assert_eq!(serde_json::to_value(Props::Auto).unwrap(), json!(true));
        assert_eq!(serde_json::to_value(Component::None).unwrap(), json!(false));

        let redirect = Redirect::Named(NamedTarget::named("login"));
        assert_eq!(serde_json::to_value(redirect).unwrap(), json!({"name": "login"}));

        let resolver = Redirect::Resolver(RedirectFn::new(|_| RedirectTarget::Path("/".into())));
        assert_eq!(serde_json::to_value(resolver).unwrap(), json!("[callback]"));
    }

    #[test]
    fn test_named_target_keeps_every_key() {
        let target = NamedTarget::named("search")
            .with("query", json!({"q": "rust"}))
            .with("replace", true);

        assert_eq!(target.name(), Some("search"));
        assert_eq!(target.path(), None);
        assert_eq!(target.query().and_then(|q| q.get("q")), Some(&json!("rust")));
        assert_eq!(target.get("replace"), Some(&json!(true)));
        assert_eq!(
            serde_json::to_value(&target).unwrap(),
            json!({"name": "search", "query": {"q": "rust"}, "replace": true})
        );

        let odd = NamedTarget::from(json!({"name": 1}).as_object().unwrap().clone());
        assert_eq!(odd.name(), None);
        assert_eq!(odd.get("name"), Some(&json!(1)));
    }

    #[test]
    fn test_param_value_views() {
        assert_eq!(ParamValue::Int(42).to_json(), json!(42));
        assert_eq!(ParamValue::Float(3.0).to_string(), "3.0");
        assert_eq!(ParamValue::from("abc").as_str(), Some("abc"));
        assert_eq!(ParamValue::Int(2).as_f64(), Some(2.0));
    }

    #[test]
    fn test_generator_empty() {
        assert_eq!(Generator::empty().generate(&Params::new()), "");
    }
}
