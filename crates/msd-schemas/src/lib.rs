//! msd-schemas
//!
//! Wire-level data model shared by every crate in the workspace.
//!
//! All types here mirror the remote portal API's JSON shapes verbatim
//! (camelCase fields, Mongo-style `_id` aliases, duck-typed id-or-object
//! references). They carry no behavior beyond identity resolution and the
//! wire-boundary money conversions in [`money`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod money;

// ---------------------------------------------------------------------------
// Duck-typed references
// ---------------------------------------------------------------------------

/// A reference to a product that may arrive as a bare id string or as an
/// embedded object (legacy stock records use both forms interchangeably).
///
/// Every place that needs a product identity goes through [`ProductRef::id`]
/// — never inline shape-sniffing at call sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductRef {
    Id(String),
    Embedded(EmbeddedProduct),
}

/// Embedded-object form of a product reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedProduct {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl ProductRef {
    /// The referenced product identity, regardless of wire form.
    pub fn id(&self) -> &str {
        match self {
            ProductRef::Id(id) => id,
            ProductRef::Embedded(e) => &e.id,
        }
    }

    /// Display name when the embedded form carries one.
    pub fn name(&self) -> Option<&str> {
        match self {
            ProductRef::Id(_) => None,
            ProductRef::Embedded(e) => e.name.as_deref(),
        }
    }
}

/// A reference to a supplier or customer, same duality as [`ProductRef`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartyRef {
    Id(String),
    Embedded(EmbeddedParty),
}

/// Embedded-object form of a supplier/customer reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedParty {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl PartyRef {
    pub fn id(&self) -> &str {
        match self {
            PartyRef::Id(id) => id,
            PartyRef::Embedded(e) => &e.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            PartyRef::Id(_) => None,
            PartyRef::Embedded(e) => e.name.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog sources
// ---------------------------------------------------------------------------

/// One catalog entry, owned by the catalog service and read-only here.
///
/// `mrp` is the list price, `trade_price` the wholesale price; either or both
/// may be absent. A product with neither resolvable price is displayed but
/// never orderable (see msd-catalog).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub mrp: Option<f64>,
    #[serde(default)]
    pub trade_price: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// A supplier's stocked quantity of one product.
///
/// Multiple records may reference the same product (different suppliers or
/// batches); msd-catalog selects exactly one per product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub product: ProductRef,
    #[serde(default)]
    pub supplier: Option<PartyRef>,
    pub available_qty: i64,
    pub cost_price: f64,
}

/// Legacy supplier-held quantity record. Carries no price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub product: ProductRef,
    #[serde(default)]
    pub supplier: Option<PartyRef>,
    pub quantity: i64,
}

// ---------------------------------------------------------------------------
// Order creation
// ---------------------------------------------------------------------------

/// One line of an order-creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: i64,
    pub price: f64,
}

/// The order-creation payload, built fresh from non-zero cart lines at each
/// submit attempt and discarded after the request resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Target supplier or hospital customer id.
    pub customer: String,
    pub items: Vec<OrderItem>,
    pub total_price: f64,
    /// Client-generated reference, unique per submit attempt.
    pub client_ref: Uuid,
    pub placed_at: DateTime<Utc>,
}

/// Acknowledgement of a created order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAck {
    #[serde(default, alias = "_id")]
    pub order_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
