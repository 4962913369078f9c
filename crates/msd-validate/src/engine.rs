//! The validation pass.

use msd_cart::Cart;
use msd_catalog::SellableIndex;

use crate::{ValidationReport, Violation};

/// Validate the cart against the current resolved availability.
///
/// Checks, in order:
/// 1. a customer/supplier target is selected (`MissingCustomer`)
/// 2. at least one line has quantity > 0 (`EmptyCart`)
/// 3. every non-zero line, in line order: the product must be priced
///    (`UnpricedProduct`) and the requested quantity must be covered by a
///    known availability record (`InsufficientStock`)
///
/// All lines are checked before the report is returned. A line can carry both
/// an `UnpricedProduct` and an `InsufficientStock` violation.
pub fn validate(
    cart: &Cart,
    index: &SellableIndex,
    customer: Option<&str>,
) -> ValidationReport {
    let mut violations: Vec<Violation> = Vec::new();

    if customer.is_none() {
        violations.push(Violation::MissingCustomer);
    }

    let lines = cart.lines(index);
    if lines.is_empty() {
        violations.push(Violation::EmptyCart);
    }

    for line in &lines {
        let requested = line.quantity as i64;
        let sellable = index.get(&line.product_id);

        if line.unit_price_micros.is_none() {
            violations.push(Violation::UnpricedProduct {
                product_id: line.product_id.clone(),
                name: line.name.clone(),
            });
        }

        match sellable.and_then(|s| s.available_stock) {
            Some(available) if requested <= available => {}
            Some(available) => violations.push(Violation::InsufficientStock {
                product_id: line.product_id.clone(),
                name: line.name.clone(),
                requested,
                available: Some(available),
            }),
            None => violations.push(Violation::InsufficientStock {
                product_id: line.product_id.clone(),
                name: line.name.clone(),
                requested,
                available: None,
            }),
        }
    }

    ValidationReport { violations }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
