//! Route modeling core for a client-side router.
//!
//! Turns declared routes into validated configs, resolves matched configs into
//! parameter-coerced records, assembles the current route snapshot and copies
//! it safely for consumers.

pub mod config;
pub mod observability;
pub mod routing;

pub use config::{load_manifest, ComponentRegistry, RouteManifest};
pub use routing::{
    build_config, build_record, build_route, clone_route, InvalidConfig, Location, Record, Route,
    RouteConfig, RouteConfigPrefab, RouteTree,
};
