//! msd-validate
//!
//! Pre-submission stock validation.
//!
//! Validation is synchronous, side-effect free, and runs to completion: every
//! line is checked before anything is reported, so the user sees all
//! violations at once rather than the first encountered. Violations are
//! declared outcomes the caller must check, not exceptions.

mod engine;
mod types;

pub use engine::validate;
pub use types::{ValidationReport, Violation};
