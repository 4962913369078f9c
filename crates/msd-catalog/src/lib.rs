//! msd-catalog
//!
//! Availability resolution and catalog merging:
//! - For each product, pick **one** authoritative (price, quantity, supplier)
//!   triple across the competing inventory and stock records.
//! - Join that resolution onto every catalog product to produce the
//!   [`SellableProduct`] view the cart, validator, and views consume.
//!
//! Deterministic, pure logic. No IO. Recomputed in full whenever any source
//! collection changes; nothing is cached across calls.

mod merge;
mod resolve;

pub use merge::{merge_catalog, SellableIndex, SellableProduct};
pub use resolve::{
    catalog_price_micros, resolve_availability, select_inventory, select_stock,
    AvailabilitySource, ResolvedAvailability,
};
