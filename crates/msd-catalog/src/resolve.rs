//! Availability resolution: one authoritative triple per product.
//!
//! Precedence is Inventory over Stock over catalog list prices. Inventory is
//! the newer, supplier-specific source; Stock is the legacy representation;
//! catalog prices are defaults of last resort.

use std::collections::BTreeMap;

use msd_schemas::money::price_to_micros;
use msd_schemas::{InventoryRecord, Product, StockRecord};

// ---------------------------------------------------------------------------
// Resolution output
// ---------------------------------------------------------------------------

/// Which source won the resolution for a product.
///
/// Carried on every [`ResolvedAvailability`] so a supplier-attribution
/// mismatch between the backends is observable rather than silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilitySource {
    /// A selected inventory record supplied price and quantity.
    Inventory,
    /// A selected legacy stock record supplied the quantity; price fell
    /// through to the catalog.
    Stock,
    /// No availability record; quantity is unknown and price (if any) comes
    /// from the catalog fields.
    CatalogOnly,
}

/// The authoritative availability for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAvailability {
    /// `None` means no positive price could be resolved from any source; the
    /// product is displayed but not orderable. Never silently priced 0.
    pub price_micros: Option<i64>,
    /// `None` means unknown — rendered as "—", never treated as zero.
    pub available_qty: Option<i64>,
    pub supplier_name: Option<String>,
    pub source: AvailabilitySource,
}

// ---------------------------------------------------------------------------
// Record selection
// ---------------------------------------------------------------------------

/// Group inventory records by product identity, keeping one per product.
///
/// A strictly higher `cost_price` wins; ties keep the first encountered.
/// Records carry no reliable ordering, so "first encountered" is the only
/// stable tie-break available.
pub fn select_inventory(records: &[InventoryRecord]) -> BTreeMap<&str, &InventoryRecord> {
    let mut selected: BTreeMap<&str, &InventoryRecord> = BTreeMap::new();
    for rec in records {
        let id = rec.product.id();
        let replace = match selected.get(id) {
            Some(current) => rec.cost_price > current.cost_price,
            None => true,
        };
        if replace {
            selected.insert(id, rec);
        }
    }
    selected
}

/// Group stock records by product identity with the same tie-break shape:
/// strictly higher `quantity` wins, first encountered on ties.
pub fn select_stock(records: &[StockRecord]) -> BTreeMap<&str, &StockRecord> {
    let mut selected: BTreeMap<&str, &StockRecord> = BTreeMap::new();
    for rec in records {
        let id = rec.product.id();
        let replace = match selected.get(id) {
            Some(current) => rec.quantity > current.quantity,
            None => true,
        };
        if replace {
            selected.insert(id, rec);
        }
    }
    selected
}

// ---------------------------------------------------------------------------
// Price fallback
// ---------------------------------------------------------------------------

/// Catalog price of last resort: `trade_price` if positive, else `mrp` if
/// positive, else `None` (unpriced).
pub fn catalog_price_micros(product: &Product) -> Option<i64> {
    positive_micros(product.trade_price).or_else(|| positive_micros(product.mrp))
}

/// A wire price counts only when it converts cleanly and is > 0. Non-finite
/// values cannot arrive through JSON; treating a conversion failure as "no
/// price" keeps resolution total.
fn positive_micros(price: Option<f64>) -> Option<i64> {
    price
        .and_then(|p| price_to_micros(p).ok())
        .filter(|m| *m > 0)
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve one product against the selected inventory and stock records.
///
/// - Inventory selected: quantity and supplier come from it; its `cost_price`
///   is the price when positive, else the catalog fallback chain applies.
/// - Stock selected (no inventory): quantity from it; Stock carries no price,
///   so the catalog fallback chain applies.
/// - Neither: quantity unknown (`None`), catalog fallback price.
pub fn resolve_availability(
    product: &Product,
    inventory: &BTreeMap<&str, &InventoryRecord>,
    stock: &BTreeMap<&str, &StockRecord>,
) -> ResolvedAvailability {
    let id = product.id.as_str();

    if let Some(inv) = inventory.get(id) {
        return ResolvedAvailability {
            price_micros: positive_micros(Some(inv.cost_price))
                .or_else(|| catalog_price_micros(product)),
            available_qty: Some(inv.available_qty),
            supplier_name: inv
                .supplier
                .as_ref()
                .and_then(|s| s.name())
                .map(str::to_string),
            source: AvailabilitySource::Inventory,
        };
    }

    if let Some(st) = stock.get(id) {
        return ResolvedAvailability {
            price_micros: catalog_price_micros(product),
            available_qty: Some(st.quantity),
            supplier_name: st
                .supplier
                .as_ref()
                .and_then(|s| s.name())
                .map(str::to_string),
            source: AvailabilitySource::Stock,
        };
    }

    ResolvedAvailability {
        price_micros: catalog_price_micros(product),
        available_qty: None,
        supplier_name: None,
        source: AvailabilitySource::CatalogOnly,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
