//! Structured tracing for top-level immutability queries.
//!
//! Events use target `tsz::immutability_json` and are intended to be consumed with:
//! `TSZ_LOG=tsz::immutability_json=trace TSZ_LOG_FORMAT=json`.
//!
//! Environment:
//! - `TSZ_QUERY_RUN_ID`: optional run identifier attached to every event.

use crate::inspector::TypeIdentity;
use crate::lattice::Immutability;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Level, trace};

static NEXT_QUERY_ID: AtomicU64 = AtomicU64::new(1);
static QUERY_RUN_ID: OnceLock<String> = OnceLock::new();

#[inline]
pub(crate) fn enabled() -> bool {
    tracing::enabled!(target: "tsz::immutability_json", Level::TRACE)
}

#[inline]
pub(crate) fn next_query_id() -> u64 {
    NEXT_QUERY_ID.fetch_add(1, Ordering::Relaxed)
}

#[inline]
fn run_id() -> &'static str {
    QUERY_RUN_ID
        .get_or_init(|| std::env::var("TSZ_QUERY_RUN_ID").unwrap_or_else(|_| "default".to_string()))
        .as_str()
}

#[inline]
pub(crate) fn classify_start(query_id: u64, op: &'static str, input: TypeIdentity) {
    trace!(
        target: "tsz::immutability_json",
        event = "query",
        phase = "start",
        run_id = run_id(),
        query_id,
        op,
        input_type_identity = input.0
    );
}

#[inline]
pub(crate) fn classify_end(
    query_id: u64,
    op: &'static str,
    result: Immutability,
    cache_hit: bool,
    max_depth: u32,
) {
    trace!(
        target: "tsz::immutability_json",
        event = "query",
        phase = "end",
        run_id = run_id(),
        query_id,
        op,
        result = result.as_str(),
        cache_hit,
        max_depth
    );
}

#[inline]
pub(crate) fn classify_error(query_id: u64, op: &'static str, error: &dyn std::fmt::Display) {
    trace!(
        target: "tsz::immutability_json",
        event = "query",
        phase = "error",
        run_id = run_id(),
        query_id,
        op,
        error = %error
    );
}
