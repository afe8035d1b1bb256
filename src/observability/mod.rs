//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! builder / record / route / tree / manifest
//!     → tracing events (structured fields: id, path, name, depth)
//!     → logging.rs subscriber (pretty or JSON on stderr)
//! ```
//!
//! # Design Decisions
//! - Library code only emits events; the binary installs the subscriber
//! - Construction events at debug, rejections at warn, coercion details at trace

pub mod logging;

pub use logging::init_logging;
