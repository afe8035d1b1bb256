//! Component name registry.
//!
//! Manifests reference components by name. The application registers a
//! factory or deferred loader under each name; [`ComponentRegistry::resolve`]
//! swaps the names in a prefab tree for those callbacks. Names that are not
//! registered stay as plain strings and are rejected by the config builder.

use std::collections::{BTreeSet, HashMap};

use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::routing::prefab::{Declared, RouteConfigPrefab};
use crate::routing::types::ComponentHandle;

/// Named component factories and loaders.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    entries: HashMap<String, Declared>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component that is produced immediately.
    pub fn register_factory(
        &mut self,
        name: impl Into<String>,
        f: impl Fn() -> ComponentHandle + Send + Sync + 'static,
    ) -> &mut Self {
        self.entries.insert(name.into(), Declared::factory(f));
        self
    }

    /// Register a component that loads lazily.
    pub fn register_loader(
        &mut self,
        name: impl Into<String>,
        f: impl Fn() -> BoxFuture<'static, ComponentHandle> + Send + Sync + 'static,
    ) -> &mut Self {
        self.entries.insert(name.into(), Declared::loader(f));
        self
    }

    /// Registry whose factories return the component name itself.
    pub fn stubbed<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for name in names {
            let name = name.into();
            let handle = name.clone();
            registry.register_factory(name, move || std::sync::Arc::new(handle.clone()) as ComponentHandle);
        }
        registry
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of `prefab` with registered component names bound to their callbacks.
    pub fn resolve(&self, prefab: &RouteConfigPrefab) -> RouteConfigPrefab {
        let mut resolved = prefab.clone();
        self.bind(&mut resolved);
        resolved
    }

    fn bind(&self, prefab: &mut RouteConfigPrefab) {
        let bound = match &prefab.component {
            Some(Declared::Data(Value::String(name))) => {
                let entry = self.entries.get(name).cloned();
                if entry.is_none() {
                    tracing::warn!(component = %name, "Component is not registered");
                }
                entry
            }
            _ => None,
        };
        if bound.is_some() {
            prefab.component = bound;
        }

        for child in &mut prefab.children {
            self.bind(child);
        }
    }
}

/// Every component name referenced in a prefab tree.
pub fn referenced_components(prefabs: &[RouteConfigPrefab]) -> BTreeSet<String> {
    fn collect(prefab: &RouteConfigPrefab, names: &mut BTreeSet<String>) {
        if let Some(Declared::Data(Value::String(name))) = &prefab.component {
            names.insert(name.clone());
        }
        for child in &prefab.children {
            collect(child, names);
        }
    }

    let mut names = BTreeSet::new();
    for prefab in prefabs {
        collect(prefab, &mut names);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use std::sync::Arc;

    fn tree() -> RouteConfigPrefab {
        RouteConfigPrefab::new("/users")
            .with_component("UserList")
            .with_child(RouteConfigPrefab::new(":id").with_component("UserDetail"))
            .with_child(RouteConfigPrefab::new("new").with_component("Unknown"))
    }

    #[test]
    fn test_resolve_binds_names() {
        let mut registry = ComponentRegistry::new();
        registry
            .register_factory("UserList", || Arc::new("list") as ComponentHandle)
            .register_loader("UserDetail", || async { Arc::new("detail") as ComponentHandle }.boxed());

        let resolved = registry.resolve(&tree());
        assert!(matches!(resolved.component, Some(Declared::Factory(_))));
        assert!(matches!(resolved.children[0].component, Some(Declared::Loader(_))));
        assert_eq!(resolved.children[1].component, Some(Declared::from("Unknown")));
    }

    #[test]
    fn test_resolve_shares_callbacks() {
        let mut registry = ComponentRegistry::new();
        registry.register_factory("UserList", || Arc::new("list") as ComponentHandle);

        let a = registry.resolve(&tree());
        let b = registry.resolve(&tree());
        assert_eq!(a.component, b.component);
    }

    #[test]
    fn test_referenced_components() {
        let names = referenced_components(&[tree()]);
        assert_eq!(
            names.into_iter().collect::<Vec<_>>(),
            vec!["Unknown", "UserDetail", "UserList"]
        );
    }

    #[test]
    fn test_stubbed_registry() {
        let registry = ComponentRegistry::stubbed(["Home"]);
        assert!(registry.contains("Home"));
        assert_eq!(registry.len(), 1);

        let resolved = registry.resolve(&RouteConfigPrefab::new("/").with_component("Home"));
        match resolved.component {
            Some(Declared::Factory(f)) => {
                let handle = f.call();
                assert_eq!(handle.downcast_ref::<String>().map(String::as_str), Some("Home"));
            }
            other => panic!("unexpected component: {:?}", other),
        }
    }
}
