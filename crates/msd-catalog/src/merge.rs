//! Catalog merging: join every product with its resolved availability.

use std::collections::BTreeMap;

use msd_schemas::{InventoryRecord, Product, StockRecord};

use crate::resolve::{
    resolve_availability, select_inventory, select_stock, AvailabilitySource,
};

// ---------------------------------------------------------------------------
// SellableProduct
// ---------------------------------------------------------------------------

/// The per-product view the cart, validator, and order views consume.
///
/// Derived, never persisted, never mutated directly: price and availability
/// are pure functions of the three source collections — never of the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct SellableProduct {
    pub id: String,
    pub name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    /// First image reference, when the catalog carries any.
    pub image: Option<String>,
    /// `None`: unpriced — displayed, never orderable.
    pub price_micros: Option<i64>,
    /// `None`: unknown — rendered "—", never treated as zero.
    pub available_stock: Option<i64>,
    pub supplier_name: Option<String>,
    pub source: AvailabilitySource,
}

impl SellableProduct {
    /// A product can be ordered only at a known positive price.
    pub fn is_orderable(&self) -> bool {
        self.price_micros.is_some()
    }
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Join each catalog product with its resolved availability.
///
/// Total: every catalog product yields exactly one [`SellableProduct`], even
/// with zero matching availability records. Output order follows the catalog.
pub fn merge_catalog(
    products: &[Product],
    inventory: &[InventoryRecord],
    stock: &[StockRecord],
) -> Vec<SellableProduct> {
    let selected_inventory = select_inventory(inventory);
    let selected_stock = select_stock(stock);

    products
        .iter()
        .map(|product| {
            let resolved =
                resolve_availability(product, &selected_inventory, &selected_stock);
            SellableProduct {
                id: product.id.clone(),
                name: product.name.clone(),
                brand: product.brand.clone(),
                category: product.category.clone(),
                image: product.images.first().cloned(),
                price_micros: resolved.price_micros,
                available_stock: resolved.available_qty,
                supplier_name: resolved.supplier_name,
                source: resolved.source,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// SellableIndex
// ---------------------------------------------------------------------------

/// Id-keyed lookup over the merged catalog, used for cart line annotation and
/// stock validation.
#[derive(Debug, Clone, Default)]
pub struct SellableIndex {
    by_id: BTreeMap<String, SellableProduct>,
}

impl SellableIndex {
    pub fn new(products: Vec<SellableProduct>) -> Self {
        let by_id = products.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self { by_id }
    }

    /// Merge the three source collections and index the result in one step.
    pub fn build(
        products: &[Product],
        inventory: &[InventoryRecord],
        stock: &[StockRecord],
    ) -> Self {
        Self::new(merge_catalog(products, inventory, stock))
    }

    pub fn get(&self, product_id: &str) -> Option<&SellableProduct> {
        self.by_id.get(product_id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SellableProduct> {
        self.by_id.values()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use msd_schemas::ProductRef;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: format!("product {id}"),
            brand: Some("Acme Pharma".to_string()),
            category: None,
            unit: None,
            mrp: Some(55.0),
            trade_price: None,
            images: vec![format!("/img/{id}.png")],
        }
    }

    #[test]
    fn merge_is_total_over_the_catalog() {
        let products = vec![product("p-1"), product("p-2"), product("p-3")];
        let inventory = vec![InventoryRecord {
            product: ProductRef::Id("p-2".to_string()),
            supplier: None,
            available_qty: 12,
            cost_price: 42.5,
        }];
        let merged = merge_catalog(&products, &inventory, &[]);
        assert_eq!(merged.len(), 3, "every catalog product must appear");
        assert_eq!(merged[0].available_stock, None);
        assert_eq!(merged[1].available_stock, Some(12));
        assert_eq!(merged[1].price_micros, Some(42_500_000));
        assert_eq!(merged[2].price_micros, Some(55_000_000));
    }

    #[test]
    fn merge_preserves_catalog_order_and_display_fields() {
        let products = vec![product("p-9"), product("p-1")];
        let merged = merge_catalog(&products, &[], &[]);
        assert_eq!(merged[0].id, "p-9");
        assert_eq!(merged[1].id, "p-1");
        assert_eq!(merged[0].image.as_deref(), Some("/img/p-9.png"));
        assert_eq!(merged[0].brand.as_deref(), Some("Acme Pharma"));
    }

    #[test]
    fn unpriced_product_is_merged_but_not_orderable() {
        let mut p = product("p-1");
        p.mrp = None;
        p.trade_price = None;
        let merged = merge_catalog(&[p], &[], &[]);
        assert_eq!(merged.len(), 1);
        assert!(!merged[0].is_orderable());
    }

    #[test]
    fn index_lookup_roundtrip() {
        let idx = SellableIndex::build(&[product("p-1"), product("p-2")], &[], &[]);
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.get("p-1").unwrap().name, "product p-1");
        assert!(idx.get("p-404").is_none());
    }

    #[test]
    fn empty_catalog_merges_to_empty() {
        let merged = merge_catalog(&[], &[], &[]);
        assert!(merged.is_empty());
        assert!(SellableIndex::new(merged).is_empty());
    }
}
