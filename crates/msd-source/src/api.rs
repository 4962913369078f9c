//! Source-endpoint boundary.
//!
//! This module defines **only** the fetch contract and its error type. No
//! concrete transport, no normalization, no envelope logic belongs here.

use std::fmt;

use serde_json::Value;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors a [`SourceApi`] implementation may return.
///
/// Callers of the loader never see these escalate: each failed fetch degrades
/// its one source to an empty collection (see `load_sources`).
#[derive(Debug)]
pub enum SourceFetchError {
    /// Network or transport failure.
    Transport(String),
    /// The endpoint answered with a non-success status.
    Status { code: u16, message: String },
    /// A response body could not be read as JSON.
    Decode(String),
}

impl fmt::Display for SourceFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFetchError::Transport(msg) => write!(f, "transport error: {msg}"),
            SourceFetchError::Status { code, message } => {
                write!(f, "source endpoint error status={code}: {message}")
            }
            SourceFetchError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for SourceFetchError {}

// ---------------------------------------------------------------------------
// Inventory scope
// ---------------------------------------------------------------------------

/// Scoping for the inventory listing: the supplier views fetch their own
/// records, the hospital order page fetches one supplier's, dashboards fetch
/// the low-stock slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryScope {
    /// Restrict to one supplier's records.
    pub supplier: Option<String>,
    /// Restrict to records at or below the backend's low-stock threshold.
    pub low_stock: bool,
}

impl InventoryScope {
    /// The unscoped (global) inventory listing.
    pub fn all() -> Self {
        Self::default()
    }

    /// Records of a single supplier.
    pub fn for_supplier(id: impl Into<String>) -> Self {
        Self {
            supplier: Some(id.into()),
            low_stock: false,
        }
    }

    pub fn is_scoped(&self) -> bool {
        self.supplier.is_some() || self.low_stock
    }
}

// ---------------------------------------------------------------------------
// SourceApi trait
// ---------------------------------------------------------------------------

/// The three read endpoints the engine consumes.
///
/// Implementations return **raw** response bodies; envelope unwrapping and
/// tolerant decoding are the normalizer's job, applied uniformly downstream.
///
/// Must be object-safe (`&dyn SourceApi`) and `Send + Sync` so one client can
/// be shared across view tasks.
#[async_trait::async_trait]
pub trait SourceApi: Send + Sync {
    /// `GET` products listing.
    async fn fetch_products(&self) -> Result<Value, SourceFetchError>;

    /// `GET` inventory listing, optionally supplier- or low-stock-scoped.
    async fn fetch_inventory(&self, scope: &InventoryScope)
        -> Result<Value, SourceFetchError>;

    /// `GET` stock listing (legacy records).
    async fn fetch_stock(&self) -> Result<Value, SourceFetchError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
