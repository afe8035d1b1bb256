//! Route config identity.
//!
//! # Design Decisions
//! - Identity is per construction, never per value
//! - The source is injectable so tests can use a deterministic counter
//! - Both sources are lock-free and safe to share across threads

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use uuid::Uuid;

/// Process-unique identity of a route config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RouteId(Uuid);

impl RouteId {
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for RouteId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Source of fresh route identities.
pub trait IdSource: Send + Sync {
    /// Returns an identity never handed out before by this source.
    fn next_id(&self) -> RouteId;
}

/// Random UUID v4 identities.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&self) -> RouteId {
        RouteId(Uuid::new_v4())
    }
}

/// Monotonic counter identities, starting at 1.
#[derive(Debug, Default)]
pub struct SequentialIds {
    issued: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> RouteId {
        let n = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        RouteId(Uuid::from_u64_pair(0, n))
    }
}

/// The process-wide source used by `build_config`.
pub fn default_source() -> &'static dyn IdSource {
    static SOURCE: RandomIds = RandomIds;
    &SOURCE
}
