//! Deterministic order API double.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use msd_schemas::{OrderAck, OrderRequest};
use msd_submit::{OrderApi, OrderApiError};

/// In-process [`OrderApi`] double.
///
/// Accepts every order with a deterministic `ORD-%06d` id unless a failure
/// has been scripted; scripted failures are consumed in FIFO order, then
/// acceptance resumes. Every received request is recorded verbatim so tests
/// can assert on the serialized payload, and the call count backs
/// idempotency assertions.
pub struct MockOrderApi {
    next_order_id: AtomicU64,
    failures: Mutex<VecDeque<OrderApiError>>,
    requests: Mutex<Vec<OrderRequest>>,
}

impl Default for MockOrderApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockOrderApi {
    pub fn new() -> Self {
        Self {
            next_order_id: AtomicU64::new(1),
            failures: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Script the next call to fail with a server rejection (message is
    /// surfaced to the user verbatim).
    pub fn reject_next(&self, message: impl Into<String>) {
        self.failures
            .lock()
            .unwrap()
            .push_back(OrderApiError::Rejected {
                message: message.into(),
            });
    }

    /// Script the next call to fail at the transport level.
    pub fn fail_next_transport(&self, message: impl Into<String>) {
        self.failures
            .lock()
            .unwrap()
            .push_back(OrderApiError::Transport(message.into()));
    }

    /// Number of create-order calls received so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// All requests received, in order.
    pub fn requests(&self) -> Vec<OrderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl OrderApi for MockOrderApi {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderAck, OrderApiError> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(err) = self.failures.lock().unwrap().pop_front() {
            return Err(err);
        }

        let id = self.next_order_id.fetch_add(1, Ordering::SeqCst);
        Ok(OrderAck {
            order_id: Some(format!("ORD-{id:06}")),
            message: Some("order placed".to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    fn request() -> OrderRequest {
        OrderRequest {
            customer: "h-1".to_string(),
            items: Vec::new(),
            total_price: 0.0,
            client_ref: Uuid::nil(),
            placed_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn order_ids_are_deterministic_counters() {
        let api = MockOrderApi::new();
        let a = api.create_order(&request()).await.unwrap();
        let b = api.create_order(&request()).await.unwrap();
        assert_eq!(a.order_id.as_deref(), Some("ORD-000001"));
        assert_eq!(b.order_id.as_deref(), Some("ORD-000002"));
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn scripted_rejection_fires_once_then_acceptance_resumes() {
        let api = MockOrderApi::new();
        api.reject_next("stock changed");
        let err = api.create_order(&request()).await.unwrap_err();
        assert_eq!(err.user_message(), "stock changed");
        assert!(api.create_order(&request()).await.is_ok());
    }
}
