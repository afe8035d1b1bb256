//! Manifest loading and assembly failures.

use route_model::config::registry::referenced_components;
use route_model::config::{load_manifest, ComponentRegistry, ManifestError};
use route_model::routing::{ConfigField, SequentialIds};

mod common;

#[test]
fn test_app_manifest_loads() {
    let manifest = common::load(common::APP_MANIFEST);
    assert_eq!(manifest.observability.log_level, "debug");
    assert_eq!(manifest.routes.len(), 4);

    let names: Vec<_> = referenced_components(&manifest.routes).into_iter().collect();
    assert_eq!(names, vec!["Home", "PostView", "Settings", "UserLayout", "UserProfile"]);
}

#[test]
fn test_tree_shape() {
    let tree = common::app_tree();
    assert_eq!(tree.len(), 6);
    assert_eq!(tree.roots().len(), 4);

    let post = tree.find_by_name("post").unwrap();
    assert_eq!(tree.full_pattern(post.id()), Some("/users/:id/posts/:slug/:page?"));
    assert_eq!(post.param_keys(), &["id", "slug", "page"]);
}

#[test]
fn test_missing_file() {
    let err = load_manifest(std::path::Path::new("/nonexistent/routes.toml")).unwrap_err();
    assert!(matches!(err, ManifestError::Io(..)));
}

#[test]
fn test_syntax_error() {
    let file = common::manifest_file("[[routes]\npath = ");
    let err = load_manifest(file.path()).unwrap_err();
    assert!(matches!(err, ManifestError::Parse(_)));
}

#[test]
fn test_unknown_route_field_rejected() {
    let file = common::manifest_file("[[routes]]\npath = \"/\"\ntitle = \"Home\"\n");
    let err = load_manifest(file.path()).unwrap_err();
    assert!(matches!(err, ManifestError::Parse(_)));
}

#[test]
fn test_all_validation_errors_reported() {
    let file = common::manifest_file(
        r#"
[observability]
log_level = "loud"

[[routes]]
path = "/a?x=1"
name = "a"

[[routes]]
path = "/b"
name = "a"
"#,
    );
    match load_manifest(file.path()).unwrap_err() {
        ManifestError::Validation(errors) => {
            assert_eq!(errors.len(), 3);
            assert_eq!(errors[0].location, "observability.log_level");
            assert_eq!(errors[1].location, "routes[0]");
            assert_eq!(errors[2].location, "routes[1]");
            assert!(errors[2].message.contains("already used at routes[0]"));
        }
        other => panic!("expected validation errors, got {:?}", other),
    }
}

#[test]
fn test_unregistered_component_fails_assembly() {
    let manifest = common::load("[[routes]]\npath = \"/\"\ncomponent = \"Missing\"\n");
    let err = manifest
        .assemble(&ComponentRegistry::new(), &SequentialIds::new(), None)
        .unwrap_err();
    match err {
        ManifestError::Build(invalid) => assert_eq!(invalid.field, ConfigField::Component),
        other => panic!("expected build error, got {:?}", other),
    }
}

#[test]
fn test_wrong_field_shape_fails_assembly() {
    let manifest = common::load("[[routes]]\npath = \"/\"\nmeta = [1, 2]\n");
    let err = manifest
        .assemble(&ComponentRegistry::new(), &SequentialIds::new(), None)
        .unwrap_err();
    assert!(err.to_string().contains("`meta`"));
}

#[test]
fn test_stubbed_registry_binds_every_reference() {
    let manifest = common::load(common::APP_MANIFEST);
    let registry = ComponentRegistry::stubbed(referenced_components(&manifest.routes));
    assert_eq!(registry.len(), 5);

    let tree = manifest
        .assemble(&registry, &SequentialIds::new(), None)
        .unwrap();
    let home = tree.find_by_name("home").unwrap();
    let handle = match home.component() {
        route_model::routing::Component::Factory(factory) => factory.call(),
        other => panic!("expected factory, got {:?}", other),
    };
    assert_eq!(handle.downcast_ref::<String>().map(String::as_str), Some("Home"));
}

#[test]
fn test_demo_manifest_assembles() {
    let manifest = common::load(include_str!("../demos/routes.toml"));
    let registry = ComponentRegistry::stubbed(referenced_components(&manifest.routes));
    let tree = manifest
        .assemble(&registry, &SequentialIds::new(), None)
        .unwrap();
    assert!(tree.find_by_name("post").is_some());
}
