//! User-authored route declarations.
//!
//! A prefab mirrors what an application writes by hand or loads from a
//! manifest. Its dynamically shaped fields hold a [`Declared`] value so the
//! builder can reject shapes that make no sense for the field.

use futures_util::future::BoxFuture;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::routing::route::Route;
use crate::routing::types::{
    ComponentFactory, ComponentHandle, ComponentLoader, PropsFn, RedirectFn, RedirectTarget,
};

/// A declared field value: plain data or one of the callback kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Declared {
    Data(Value),
    Redirect(RedirectFn),
    Props(PropsFn),
    Factory(ComponentFactory),
    Loader(ComponentLoader),
}

impl Declared {
    pub fn redirect_fn(f: impl Fn(&Route) -> RedirectTarget + Send + Sync + 'static) -> Self {
        Declared::Redirect(RedirectFn::new(f))
    }

    pub fn props_fn(f: impl Fn(&Route) -> Map<String, Value> + Send + Sync + 'static) -> Self {
        Declared::Props(PropsFn::new(f))
    }

    pub fn factory(f: impl Fn() -> ComponentHandle + Send + Sync + 'static) -> Self {
        Declared::Factory(ComponentFactory::new(f))
    }

    pub fn loader(f: impl Fn() -> BoxFuture<'static, ComponentHandle> + Send + Sync + 'static) -> Self {
        Declared::Loader(ComponentLoader::new(f))
    }

    /// Short description of the value's shape, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Declared::Data(Value::Null) => "null",
            Declared::Data(Value::Bool(_)) => "boolean",
            Declared::Data(Value::Number(_)) => "number",
            Declared::Data(Value::String(_)) => "string",
            Declared::Data(Value::Array(_)) => "array",
            Declared::Data(Value::Object(_)) => "object",
            Declared::Redirect(_) => "redirect resolver",
            Declared::Props(_) => "props resolver",
            Declared::Factory(_) => "component factory",
            Declared::Loader(_) => "component loader",
        }
    }

    /// Explicit `null` is treated the same as an absent field.
    pub(crate) fn is_null(&self) -> bool {
        matches!(self, Declared::Data(Value::Null))
    }
}

impl From<Value> for Declared {
    fn from(value: Value) -> Self {
        Declared::Data(value)
    }
}

impl From<&str> for Declared {
    fn from(s: &str) -> Self {
        Declared::Data(Value::String(s.to_string()))
    }
}

impl From<String> for Declared {
    fn from(s: String) -> Self {
        Declared::Data(Value::String(s))
    }
}

impl From<bool> for Declared {
    fn from(b: bool) -> Self {
        Declared::Data(Value::Bool(b))
    }
}

impl From<Map<String, Value>> for Declared {
    fn from(map: Map<String, Value>) -> Self {
        Declared::Data(Value::Object(map))
    }
}

impl<'de> Deserialize<'de> for Declared {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Declared::Data)
    }
}

/// A route declaration before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouteConfigPrefab {
    pub path: Option<Declared>,
    pub name: Option<String>,
    pub redirect: Option<Declared>,
    pub component: Option<Declared>,
    pub meta: Option<Declared>,
    pub props: Option<Declared>,
    pub children: Vec<RouteConfigPrefab>,
}

impl RouteConfigPrefab {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(Declared::from(path.into())),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_redirect(mut self, redirect: impl Into<Declared>) -> Self {
        self.redirect = Some(redirect.into());
        self
    }

    pub fn with_component(mut self, component: impl Into<Declared>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_meta(mut self, meta: impl Into<Declared>) -> Self {
        self.meta = Some(meta.into());
        self
    }

    pub fn with_props(mut self, props: impl Into<Declared>) -> Self {
        self.props = Some(props.into());
        self
    }

    pub fn with_child(mut self, child: RouteConfigPrefab) -> Self {
        self.children.push(child);
        self
    }

    /// The declared path, if it is a string.
    pub fn path_str(&self) -> Option<&str> {
        match &self.path {
            Some(Declared::Data(Value::String(path))) => Some(path),
            _ => None,
        }
    }
}
