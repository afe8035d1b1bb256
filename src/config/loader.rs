//! Manifest loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::registry::ComponentRegistry;
use crate::config::schema::RouteManifest;
use crate::config::validation::{validate_manifest, ValidationError};
use crate::routing::error::InvalidConfig;
use crate::routing::identity::IdSource;
use crate::routing::pattern::PatternCompiler;
use crate::routing::tree::RouteTree;

/// Error type for manifest loading and assembly.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Build(#[from] InvalidConfig),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate a manifest from TOML source.
pub fn parse_manifest(content: &str) -> Result<RouteManifest, ManifestError> {
    let manifest: RouteManifest = toml::from_str(content)?;
    validate_manifest(&manifest).map_err(ManifestError::Validation)?;
    Ok(manifest)
}

/// Load and validate a manifest from a TOML file.
pub fn load_manifest(path: &Path) -> Result<RouteManifest, ManifestError> {
    let content = fs::read_to_string(path).map_err(|e| ManifestError::Io(path.to_path_buf(), e))?;
    let manifest = parse_manifest(&content)?;
    tracing::debug!(path = %path.display(), routes = manifest.routes.len(), "Manifest loaded");
    Ok(manifest)
}

impl RouteManifest {
    /// Bind components and assemble the declared routes into a tree.
    pub fn assemble(
        &self,
        registry: &ComponentRegistry,
        ids: &dyn IdSource,
        compiler: Option<&dyn PatternCompiler>,
    ) -> Result<RouteTree, ManifestError> {
        let prefabs: Vec<_> = self.routes.iter().map(|route| registry.resolve(route)).collect();
        Ok(RouteTree::assemble_with(&prefabs, ids, compiler)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::error::ConfigField;
    use crate::routing::identity::SequentialIds;
    use crate::routing::pattern::SegmentCompiler;
    use crate::routing::types::ComponentHandle;
    use std::io::Write;
    use std::sync::Arc;

    const MANIFEST: &str = r#"
        [[routes]]
        path = "/users/:id"
        name = "user"
        component = "User"
        meta = { auth = true }
    "#;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MANIFEST.as_bytes()).unwrap();

        let manifest = load_manifest(file.path()).unwrap();
        assert_eq!(manifest.routes.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = load_manifest(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ManifestError::Io(..)));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_manifest("[[routes]\npath = ").unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
    }

    #[test]
    fn test_validation_error_message() {
        let err = parse_manifest("[[routes]]\npath = \"/a#b\"").unwrap_err();
        assert!(matches!(err, ManifestError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().starts_with("Validation failed: routes[0]:"));
    }

    #[test]
    fn test_assemble_with_registry() {
        let manifest = parse_manifest(MANIFEST).unwrap();
        let mut registry = ComponentRegistry::new();
        registry.register_factory("User", || Arc::new("user") as ComponentHandle);

        let tree = manifest
            .assemble(&registry, &SequentialIds::new(), Some(&SegmentCompiler))
            .unwrap();
        let user = tree.find_by_name("user").unwrap();
        assert_eq!(user.param_keys(), &["id".to_string()]);
        assert!(!user.component().is_none());
    }

    #[test]
    fn test_assemble_unregistered_component() {
        let manifest = parse_manifest(MANIFEST).unwrap();
        let err = manifest
            .assemble(&ComponentRegistry::new(), &SequentialIds::new(), None)
            .unwrap_err();
        match err {
            ManifestError::Build(invalid) => assert_eq!(invalid.field, ConfigField::Component),
            other => panic!("unexpected error: {}", other),
        }
    }
}
