//! Independent copies of route snapshots.
//!
//! # Field Classification
//! ```text
//! plain data (deep copy):   name, path, hash, full_path, query, params, action,
//!                           per record: id, name, path, async, params
//! non-data (by reference):  redirect, component, props, meta
//! ```
//!
//! # Design Decisions
//! - The classification is fixed by the types (`RecordData` vs `Attachments`)
//! - Callbacks keep their identity; they are never re-created
//! - `Route` has no `Clone` impl; this is the only way to copy one

use std::sync::Arc;

use crate::routing::record::Record;
use crate::routing::route::Route;

/// Copy `route`, or return the empty placeholder when there is none.
pub fn clone_route(route: Option<&Route>) -> Route {
    let Some(route) = route else {
        tracing::trace!("No route to clone, returning placeholder");
        return Route::placeholder();
    };

    Route {
        name: route.name.clone(),
        path: route.path.clone(),
        hash: route.hash.clone(),
        full_path: route.full_path.clone(),
        query: route.query.clone(),
        params: route.params.clone(),
        meta: Arc::clone(&route.meta),
        redirect: route.redirect.clone(),
        action: route.action,
        matched: route.matched.iter().map(clone_record).collect(),
    }
}

fn clone_record(record: &Record) -> Record {
    Record {
        data: record.data.clone(),
        attachments: record.attachments.share(),
    }
}
