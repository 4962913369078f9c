//! Order-creation boundary.
//!
//! This module defines only the write contract and its error taxonomy. The
//! HTTP implementation lives in msd-client; deterministic mocks live in
//! msd-testkit.

use std::fmt;

use msd_schemas::{OrderAck, OrderRequest};

/// Fallback shown when the server gave no usable failure message.
pub const GENERIC_SUBMIT_FAILURE: &str = "order submission failed; please try again";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors an [`OrderApi`] implementation may return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderApiError {
    /// The server rejected the order (e.g. stock consumed by another actor
    /// between validation and submission). `message` is the server's own
    /// wording and is surfaced to the user verbatim.
    Rejected { message: String },
    /// Network or transport failure; no server message is available.
    Transport(String),
}

impl OrderApiError {
    /// The message to surface: the server's verbatim where available, the
    /// generic fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            OrderApiError::Rejected { message } => message.clone(),
            OrderApiError::Transport(_) => GENERIC_SUBMIT_FAILURE.to_string(),
        }
    }
}

impl fmt::Display for OrderApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderApiError::Rejected { message } => write!(f, "order rejected: {message}"),
            OrderApiError::Transport(msg) => write!(f, "transport error: {msg}"),
        }
    }
}

impl std::error::Error for OrderApiError {}

// ---------------------------------------------------------------------------
// OrderApi trait
// ---------------------------------------------------------------------------

/// The order-creation endpoint.
#[async_trait::async_trait]
pub trait OrderApi: Send + Sync {
    /// `POST` the order-creation request and await the acknowledgement.
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderAck, OrderApiError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
