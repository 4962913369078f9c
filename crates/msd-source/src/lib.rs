//! msd-source
//!
//! Source acquisition and normalization for the ordering engine:
//!
//! - envelope-tolerant normalization of the three raw source payloads
//!   (`normalize`)
//! - the async fetch contract implemented by the HTTP client (`api`)
//! - the last-request-wins fetch watermark (`watermark`)
//! - [`load_sources`], which fires the three fetches concurrently and
//!   degrades each failure independently to an empty collection
//!
//! This crate does **not** resolve availability or merge the catalog; that is
//! msd-catalog, which consumes the [`SourceSet`] produced here.

pub mod api;
pub mod normalize;
pub mod watermark;

use msd_schemas::{InventoryRecord, Product, StockRecord};
use serde_json::Value;

use crate::api::{InventoryScope, SourceApi};
use crate::normalize::decode_collection;

// ---------------------------------------------------------------------------
// SourceSet
// ---------------------------------------------------------------------------

/// The three source collections in normalized, flat form.
///
/// A missing or malformed source appears as an empty vec — downstream
/// resolution treats "no records" and "source degraded" identically, which is
/// exactly the graceful-degradation contract.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceSet {
    pub products: Vec<Product>,
    pub inventory: Vec<InventoryRecord>,
    pub stock: Vec<StockRecord>,
}

impl SourceSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.inventory.is_empty() && self.stock.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Decode + load
// ---------------------------------------------------------------------------

/// Normalize three raw response bodies into a [`SourceSet`].
///
/// Pure transform; never fails. Unrecognized envelopes and undecodable
/// records degrade with a warning (see [`normalize`]).
pub fn decode_sources(products: &Value, inventory: &Value, stock: &Value) -> SourceSet {
    SourceSet {
        products: decode_collection("products", products),
        inventory: decode_collection("inventory", inventory),
        stock: decode_collection("stock", stock),
    }
}

/// Fetch all three sources concurrently and normalize the results.
///
/// The fetches are fired together and resolve independently; a failure
/// degrades that one source to an empty collection rather than blocking or
/// failing the other two.
pub async fn load_sources(api: &dyn SourceApi, scope: &InventoryScope) -> SourceSet {
    let (products, inventory, stock) = tokio::join!(
        api.fetch_products(),
        api.fetch_inventory(scope),
        api.fetch_stock(),
    );

    let products = unwrap_or_degrade("products", products);
    let inventory = unwrap_or_degrade("inventory", inventory);
    let stock = unwrap_or_degrade("stock", stock);

    decode_sources(&products, &inventory, &stock)
}

fn unwrap_or_degrade(
    source: &'static str,
    result: Result<Value, api::SourceFetchError>,
) -> Value {
    match result {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!(source, %err, "source fetch failed; degrading to empty");
            Value::Array(Vec::new())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
