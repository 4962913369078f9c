//! msd-submit
//!
//! Order submission: the confirm-then-submit state machine, the
//! order-creation API boundary, and the [`OrderSession`] that wires sources,
//! catalog, cart, and validation into one per-view ordering flow.
//!
//! The separation (validate locally, confirm, submit, reconcile) exists
//! because availability is read from a snapshot that may be stale by the time
//! of submission. The engine claims no atomicity with the server: it clears
//! the cart only on confirmed success and treats failure as "retry from the
//! current cart", never as "assume it partially succeeded".

mod api;
mod flow;
mod session;

pub use api::{OrderApi, OrderApiError, GENERIC_SUBMIT_FAILURE};
pub use flow::{BeginOutcome, OrderFlow, SubmissionGrant, SubmitState};
pub use session::{OrderSession, OrderSummary, PlaceOrderOutcome, SubmitOutcome};
