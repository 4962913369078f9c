//! Validation outcome types.

use std::fmt;

/// One reason the cart cannot be submitted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// No entry has a quantity above zero. Reported once.
    EmptyCart,
    /// No supplier/customer target has been selected. Reported once.
    MissingCustomer,
    /// The requested quantity exceeds the resolved availability, or no
    /// availability record exists for the line at all (`available: None`).
    InsufficientStock {
        product_id: String,
        name: String,
        requested: i64,
        available: Option<i64>,
    },
    /// No positive price could be resolved from any source; the line is not
    /// orderable.
    UnpricedProduct { product_id: String, name: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EmptyCart => {
                write!(f, "the cart has no items to order")
            }
            Violation::MissingCustomer => {
                write!(f, "no supplier or customer has been selected")
            }
            Violation::InsufficientStock {
                name,
                requested,
                available: Some(available),
                ..
            } => {
                write!(
                    f,
                    "'{name}': requested {requested} but only {available} available"
                )
            }
            Violation::InsufficientStock {
                name,
                requested,
                available: None,
                ..
            } => {
                write!(f, "'{name}': requested {requested} but no stock is on record")
            }
            Violation::UnpricedProduct { name, .. } => {
                write!(f, "'{name}': no price available, cannot be ordered")
            }
        }
    }
}

/// All violations found in one validation pass, in deterministic order:
/// aggregate checks first, then per-line checks in line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn clean() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
