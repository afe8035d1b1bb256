//! Route modeling subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     RouteConfigPrefab
//!     → builder.rs (validate, normalize, assign identity)
//!     → tree.rs (wire parent/children, hand patterns to the compiler)
//!     → RouteTree (immutable)
//!
//! Per navigation:
//!     matched configs + RawParams
//!     → record.rs (extract + coerce params)
//!     → route.rs (project leaf, compose full path)
//!     → Route
//!     → clone.rs (independent copies for consumers)
//! ```
//!
//! # Design Decisions
//! - Every operation is pure and synchronous; only identity generation touches shared state
//! - `RouteConfig`, `Record` and `Route` are only constructed by this subsystem
//! - Only the builder can fail

pub mod builder;
pub mod clone;
pub mod coerce;
pub mod error;
pub mod identity;
pub mod matcher;
pub mod pattern;
pub mod prefab;
pub mod record;
pub mod route;
pub mod tree;
pub mod types;

pub use builder::{build_config, build_config_with, CompiledPattern, RouteConfig};
pub use clone::clone_route;
pub use coerce::{coerce_param, coerce_str};
pub use error::{ConfigField, InvalidConfig};
pub use identity::{IdSource, RandomIds, RouteId, SequentialIds};
pub use matcher::{NeverMatcher, PathMatcher, RegexMatcher};
pub use pattern::{required_params, PatternCompiler, SegmentCompiler};
pub use prefab::{Declared, RouteConfigPrefab};
pub use record::{build_record, build_records, RawParams, Record};
pub use route::{build_route, compose_full_path, Action, Location, Route};
pub use tree::RouteTree;
pub use types::{
    Component, ComponentFactory, ComponentHandle, ComponentLoader, Generator, Meta, NamedTarget,
    ParamValue, Params, Props, PropsFn, Redirect, RedirectFn, RedirectTarget,
};
