//! msd-testkit
//!
//! Deterministic in-process doubles for the source and order API boundaries.
//! No randomness, no network IO: order ids come from a running counter,
//! failures are scripted explicitly by the test.

mod mock_order;
mod mock_source;

pub use mock_order::MockOrderApi;
pub use mock_source::MockSourceApi;
