//! msd-cart
//!
//! The running cart: a mapping from product identity to requested quantity,
//! with derived aggregate reads.
//!
//! # Invariant
//!
//! The cart never stores price or name — only `product id → quantity`. Every
//! derived read ([`Cart::lines`], [`Cart::subtotal_micros`]) annotates lines
//! from the **current** [`SellableIndex`] at read time, so the cart cannot go
//! stale relative to catalog or availability changes.
//!
//! Quantities are non-negative integers, always. Fractional or negative input
//! is clamped at the boundary, never rejected and never stored.

use std::collections::BTreeMap;

use msd_catalog::SellableIndex;

// ---------------------------------------------------------------------------
// Quantity clamping
// ---------------------------------------------------------------------------

/// Clamp raw form input to a storable quantity: negative and `NaN` floor to
/// 0, fractional values floor to the integer below, oversized values saturate.
pub fn clamp_quantity(requested: f64) -> u32 {
    let floored = requested.max(0.0).floor();
    if floored >= u32::MAX as f64 {
        u32::MAX
    } else {
        floored as u32
    }
}

// ---------------------------------------------------------------------------
// CartLine
// ---------------------------------------------------------------------------

/// One active cart entry annotated with current catalog data.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: String,
    /// Current catalog name; falls back to the product id when the catalog
    /// no longer carries the product.
    pub name: String,
    pub quantity: u32,
    /// Current resolved unit price. `None` for an unpriced product — such a
    /// line never reaches the wire (validation blocks it).
    pub unit_price_micros: Option<i64>,
    /// `quantity × unit price`; 0 when unpriced.
    pub line_total_micros: i64,
}

// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------

/// Session-scoped cart state. Initialized empty; mutated only by explicit
/// user actions; cleared on successful submission or explicit reset. Never
/// persisted.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    quantities: BTreeMap<String, u32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment by one. A product not yet tracked initializes at 1.
    pub fn add_one(&mut self, product_id: &str) {
        let q = self.quantities.entry(product_id.to_string()).or_insert(0);
        *q = q.saturating_add(1);
    }

    /// Decrement by one, floored at 0. Untracked products stay untracked.
    pub fn remove_one(&mut self, product_id: &str) {
        if let Some(q) = self.quantities.get_mut(product_id) {
            *q = q.saturating_sub(1);
        }
    }

    /// Set the absolute quantity from raw input, clamped via
    /// [`clamp_quantity`]. Never an error.
    pub fn set_quantity(&mut self, product_id: &str, requested: f64) {
        self.quantities
            .insert(product_id.to_string(), clamp_quantity(requested));
    }

    /// Zero the line. The mapping entry persists at zero, so the line
    /// disappears from active views without forgetting the key.
    pub fn remove(&mut self, product_id: &str) {
        self.set_quantity(product_id, 0.0);
    }

    /// Reset every quantity to zero (successful submission, explicit reset).
    pub fn clear(&mut self) {
        for q in self.quantities.values_mut() {
            *q = 0;
        }
    }

    /// Current quantity for a product (0 when untracked).
    pub fn quantity(&self, product_id: &str) -> u32 {
        self.quantities.get(product_id).copied().unwrap_or(0)
    }

    /// Count of entries with quantity > 0.
    pub fn active_line_count(&self) -> usize {
        self.quantities.values().filter(|q| **q > 0).count()
    }

    /// `true` when no entry has quantity > 0.
    pub fn is_empty(&self) -> bool {
        self.active_line_count() == 0
    }

    /// Sum of all requested quantities.
    pub fn total_quantity(&self) -> i64 {
        self.quantities.values().map(|q| *q as i64).sum()
    }

    /// Iterate `(product id, quantity)` for entries with quantity > 0.
    pub fn active_entries(&self) -> impl Iterator<Item = (&str, u32)> {
        self.quantities
            .iter()
            .filter(|(_, q)| **q > 0)
            .map(|(id, q)| (id.as_str(), *q))
    }

    /// All entries with quantity > 0, annotated with the current catalog's
    /// name and price — read live, never cached at add time.
    pub fn lines(&self, index: &SellableIndex) -> Vec<CartLine> {
        self.active_entries()
            .map(|(id, quantity)| {
                let sellable = index.get(id);
                let unit_price_micros = sellable.and_then(|s| s.price_micros);
                CartLine {
                    product_id: id.to_string(),
                    name: sellable
                        .map(|s| s.name.clone())
                        .unwrap_or_else(|| id.to_string()),
                    quantity,
                    unit_price_micros,
                    line_total_micros: unit_price_micros
                        .map(|p| p * quantity as i64)
                        .unwrap_or(0),
                }
            })
            .collect()
    }

    /// Sum of line totals over priced lines.
    pub fn subtotal_micros(&self, index: &SellableIndex) -> i64 {
        self.lines(index).iter().map(|l| l.line_total_micros).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use msd_catalog::merge_catalog;
    use msd_schemas::Product;

    fn index(prices: &[(&str, Option<f64>)]) -> SellableIndex {
        let products: Vec<Product> = prices
            .iter()
            .map(|(id, trade)| Product {
                id: id.to_string(),
                name: format!("product {id}"),
                brand: None,
                category: None,
                unit: None,
                mrp: None,
                trade_price: *trade,
                images: Vec::new(),
            })
            .collect();
        SellableIndex::new(merge_catalog(&products, &[], &[]))
    }

    // --- clamping ---

    #[test]
    fn negative_quantity_clamps_to_zero() {
        let mut cart = Cart::new();
        cart.set_quantity("p-1", -5.0);
        assert_eq!(cart.quantity("p-1"), 0);
    }

    #[test]
    fn fractional_quantity_floors() {
        let mut cart = Cart::new();
        cart.set_quantity("p-1", 3.7);
        assert_eq!(cart.quantity("p-1"), 3);
    }

    #[test]
    fn nan_quantity_clamps_to_zero() {
        assert_eq!(clamp_quantity(f64::NAN), 0);
    }

    #[test]
    fn oversized_quantity_saturates() {
        assert_eq!(clamp_quantity(1e12), u32::MAX);
    }

    // --- mutation semantics ---

    #[test]
    fn add_one_initializes_untracked_at_one() {
        let mut cart = Cart::new();
        cart.add_one("p-1");
        assert_eq!(cart.quantity("p-1"), 1);
        cart.add_one("p-1");
        assert_eq!(cart.quantity("p-1"), 2);
    }

    #[test]
    fn remove_one_floors_at_zero() {
        let mut cart = Cart::new();
        cart.add_one("p-1");
        cart.remove_one("p-1");
        cart.remove_one("p-1");
        assert_eq!(cart.quantity("p-1"), 0);
        // Untracked product stays untracked.
        cart.remove_one("p-404");
        assert_eq!(cart.quantity("p-404"), 0);
    }

    #[test]
    fn remove_keeps_entry_but_hides_line() {
        let mut cart = Cart::new();
        cart.set_quantity("p-1", 4.0);
        cart.remove("p-1");
        assert_eq!(cart.quantity("p-1"), 0);
        assert_eq!(cart.active_line_count(), 0);
        assert!(cart.lines(&index(&[("p-1", Some(10.0))])).is_empty());
    }

    #[test]
    fn clear_zeroes_every_entry() {
        let mut cart = Cart::new();
        cart.set_quantity("p-1", 2.0);
        cart.set_quantity("p-2", 3.0);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_quantity(), 0);
    }

    // --- derived reads ---

    #[test]
    fn lines_and_totals() {
        let idx = index(&[("p-1", Some(100.0)), ("p-2", Some(25.0))]);
        let mut cart = Cart::new();
        cart.set_quantity("p-1", 2.0);
        cart.set_quantity("p-2", 4.0);

        let lines = cart.lines(&idx);
        assert_eq!(lines.len(), 2);
        assert_eq!(cart.total_quantity(), 6);
        assert_eq!(cart.subtotal_micros(&idx), 300_000_000);
    }

    #[test]
    fn unpriced_line_contributes_nothing_to_subtotal() {
        let idx = index(&[("p-1", Some(100.0)), ("p-2", None)]);
        let mut cart = Cart::new();
        cart.set_quantity("p-1", 1.0);
        cart.set_quantity("p-2", 5.0);

        let lines = cart.lines(&idx);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].unit_price_micros, None);
        assert_eq!(lines[1].line_total_micros, 0);
        assert_eq!(cart.subtotal_micros(&idx), 100_000_000);
    }

    #[test]
    fn line_for_product_missing_from_catalog_falls_back_to_id() {
        let idx = index(&[]);
        let mut cart = Cart::new();
        cart.set_quantity("p-gone", 1.0);
        let lines = cart.lines(&idx);
        assert_eq!(lines[0].name, "p-gone");
        assert_eq!(lines[0].unit_price_micros, None);
    }
}
