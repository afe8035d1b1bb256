//! Shared utilities for integration tests.

use std::io::Write;
use std::sync::Arc;

use futures_util::FutureExt;
use tempfile::NamedTempFile;

use route_model::config::{load_manifest, ComponentRegistry, RouteManifest};
use route_model::routing::{ComponentHandle, RouteTree, SegmentCompiler, SequentialIds};

/// Manifest used across the flow tests.
#[allow(dead_code)]
pub const APP_MANIFEST: &str = r#"
[observability]
log_level = "debug"

[[routes]]
path = "/"
name = "home"
component = "Home"

[[routes]]
path = "/users"
name = "users"
component = "UserLayout"
meta = { section = "people" }

  [[routes.children]]
  path = ":id"
  name = "user"
  component = "UserProfile"
  props = true
  meta = { auth = true }

    [[routes.children.children]]
    path = "posts/:slug/:page?"
    name = "post"
    component = "PostView"

[[routes]]
path = "/old-users"
redirect = { name = "users" }

[[routes]]
path = "/settings"
name = "settings"
component = "Settings"
props = { tab = "general" }
"#;

/// Write `content` to a temporary manifest file.
pub fn manifest_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Load a manifest through the file loader.
#[allow(dead_code)]
pub fn load(content: &str) -> RouteManifest {
    let file = manifest_file(content);
    load_manifest(file.path()).unwrap()
}

/// Registry with synchronous factories, except `PostView` which loads lazily.
#[allow(dead_code)]
pub fn app_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    for name in ["Home", "UserLayout", "UserProfile", "Settings"] {
        registry.register_factory(name, move || Arc::new(name) as ComponentHandle);
    }
    registry.register_loader("PostView", || async { Arc::new("PostView") as ComponentHandle }.boxed());
    registry
}

/// Assemble with deterministic ids and the segment compiler.
#[allow(dead_code)]
pub fn app_tree() -> RouteTree {
    load(APP_MANIFEST)
        .assemble(&app_registry(), &SequentialIds::new(), Some(&SegmentCompiler))
        .unwrap()
}
