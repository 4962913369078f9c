//! Integer-micros money representation.
//!
//! # Design invariant
//!
//! All prices inside the engine — resolved availability prices, cart line
//! prices, subtotals — are `i64` integer micros (1 currency unit =
//! 1_000_000 micros). This keeps price comparison and summation exact: two
//! supplier cost prices that compare equal as `f64` but differ at the 7th
//! decimal place stay distinguishable, and a 40-line subtotal accumulates no
//! drift.
//!
//! `f64` conversions happen **only** at the wire boundary:
//!
//! | Direction                   | Function            |
//! |-----------------------------|---------------------|
//! | internal → order API JSON   | [`micros_to_price`] |
//! | catalog/inventory JSON → internal | [`price_to_micros`] |
//!
//! No other code path should produce or consume `f64` prices.

/// Scale factor: 1 currency unit = 1_000_000 micros (6 decimal places).
pub const MICROS_PER_UNIT: i64 = 1_000_000;

// ---------------------------------------------------------------------------
// MoneyError
// ---------------------------------------------------------------------------

/// Errors returned by [`price_to_micros`] when the input is not representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// Input was `NaN` or infinite. Valid JSON never carries these, so they
    /// indicate a broken upstream and must not propagate into `i64` prices.
    NotFinite,
    /// Input would overflow `i64` after scaling by [`MICROS_PER_UNIT`].
    OutOfRange,
}

impl std::fmt::Display for MoneyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoneyError::NotFinite => {
                write!(f, "price_to_micros: non-finite input (NaN or Inf)")
            }
            MoneyError::OutOfRange => {
                write!(f, "price_to_micros: price out of i64 range after scaling")
            }
        }
    }
}

impl std::error::Error for MoneyError {}

// ---------------------------------------------------------------------------
// Wire-boundary conversion functions
// ---------------------------------------------------------------------------

/// Convert an integer-micros price to `f64` for order-API serialization.
///
/// **Only call when building the order-creation JSON body.** Internal prices
/// stay as `i64`. `f64`'s 53-bit mantissa is exact for any realistic
/// pharmaceutical unit price.
pub fn micros_to_price(micros: i64) -> f64 {
    micros as f64 / MICROS_PER_UNIT as f64
}

/// Convert an `f64` price received from a source payload into integer micros.
///
/// Rounds to the nearest micro to avoid systematic truncation bias.
///
/// # Errors
/// [`MoneyError::NotFinite`] for `NaN`/infinite input, [`MoneyError::OutOfRange`]
/// if `price * MICROS_PER_UNIT` would overflow `i64`. Both fire in all build
/// profiles.
pub fn price_to_micros(price: f64) -> Result<i64, MoneyError> {
    if !price.is_finite() {
        return Err(MoneyError::NotFinite);
    }
    let scaled = price * MICROS_PER_UNIT as f64;
    // Rust f64→i64 casts saturate; reject explicitly instead.
    if scaled > i64::MAX as f64 || scaled < i64::MIN as f64 {
        return Err(MoneyError::OutOfRange);
    }
    Ok(scaled.round() as i64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
