//! Route manifest subsystem.
//!
//! # Data Flow
//! ```text
//! manifest file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouteManifest (validated)
//!     → registry.rs (bind component names to callbacks)
//!     → routing::tree (build configs, wire the tree)
//! ```
//!
//! # Design Decisions
//! - All sections have defaults to allow minimal manifests
//! - Validation separates syntactic (serde) from semantic checks
//! - Field shapes are left to the config builder, which reports them as `InvalidConfig`

pub mod loader;
pub mod registry;
pub mod schema;
pub mod validation;

pub use loader::{load_manifest, parse_manifest, ManifestError};
pub use registry::ComponentRegistry;
pub use schema::{LogFormat, ObservabilityConfig, RouteManifest};
pub use validation::ValidationError;
