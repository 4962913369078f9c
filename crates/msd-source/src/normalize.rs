//! Envelope normalization for raw source payloads.
//!
//! The three read endpoints (products, inventory, stock) are served by
//! different backend handlers and wrap their collections inconsistently: a
//! bare array, `{"data": [...]}`, `{"items": [...]}`, sometimes a nested
//! `{"data": {"items": [...]}}`. This module is the single place that
//! shape-sniffing is allowed to happen.
//!
//! An unrecognized envelope normalizes to an **empty list**, never an error
//! — a partial backend outage degrades the one affected source instead of
//! crashing the order flow.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Envelope keys probed in order. First match wins (deterministic when a
/// payload carries more than one).
const ENVELOPE_KEYS: &[&str] = &["data", "items", "results", "records", "rows", "list"];

/// Maximum nesting of envelopes we will descend through.
const MAX_ENVELOPE_DEPTH: u8 = 2;

// ---------------------------------------------------------------------------
// Unwrap
// ---------------------------------------------------------------------------

/// Extract the collection carried by `body`, whatever the envelope shape.
///
/// `source` labels the collection in degradation warnings (`"products"`,
/// `"inventory"`, `"stock"`).
pub fn unwrap_collection(source: &'static str, body: &Value) -> Vec<Value> {
    unwrap_at_depth(source, body, 0)
}

fn unwrap_at_depth(source: &'static str, body: &Value, depth: u8) -> Vec<Value> {
    match body {
        Value::Array(items) => items.clone(),
        Value::Object(map) if depth < MAX_ENVELOPE_DEPTH => {
            for key in ENVELOPE_KEYS {
                if let Some(inner) = map.get(*key) {
                    return unwrap_at_depth(source, inner, depth + 1);
                }
            }
            tracing::warn!(source, "unrecognized source envelope; degrading to empty");
            Vec::new()
        }
        _ => {
            tracing::warn!(source, "source payload is not a collection; degrading to empty");
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Typed decode
// ---------------------------------------------------------------------------

/// Unwrap `body` and decode each element as `T`.
///
/// Elements that fail to deserialize are skipped with a warning rather than
/// failing the whole collection; one malformed record must not take down the
/// other forty-nine.
pub fn decode_collection<T: DeserializeOwned>(source: &'static str, body: &Value) -> Vec<T> {
    let raw = unwrap_collection(source, body);
    let mut out = Vec::with_capacity(raw.len());
    for (index, item) in raw.into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(v) => out.push(v),
            Err(err) => {
                tracing::warn!(source, index, %err, "skipping undecodable record");
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
