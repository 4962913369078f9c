use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use msd_schemas::{OrderAck, OrderRequest};
use msd_source::api::{InventoryScope, SourceApi, SourceFetchError};
use msd_submit::{OrderApi, OrderApiError, OrderSession, SubmitOutcome, SubmitState};
use serde_json::{json, Value};

struct StaticSource;

#[async_trait::async_trait]
impl SourceApi for StaticSource {
    async fn fetch_products(&self) -> Result<Value, SourceFetchError> {
        Ok(json!([
            {"_id": "p-1", "name": "Paracetamol 500mg", "tradePrice": 40.0},
            {"_id": "p-2", "name": "Amoxicillin 250mg", "tradePrice": 80.0},
            {"_id": "p-3", "name": "Cetirizine 10mg", "tradePrice": 15.0}
        ]))
    }

    async fn fetch_inventory(&self, _: &InventoryScope) -> Result<Value, SourceFetchError> {
        Ok(json!([
            {"product": "p-1", "availableQty": 100, "costPrice": 38.0},
            {"product": "p-2", "availableQty": 100, "costPrice": 75.0},
            {"product": "p-3", "availableQty": 100, "costPrice": 12.0}
        ]))
    }

    async fn fetch_stock(&self) -> Result<Value, SourceFetchError> {
        Ok(json!([]))
    }
}

/// Counts create_order calls; fails every call when `reject` carries a message.
struct CountingOrderApi {
    calls: AtomicUsize,
    reject: Option<String>,
}

#[async_trait::async_trait]
impl OrderApi for CountingOrderApi {
    async fn create_order(&self, _req: &OrderRequest) -> Result<OrderAck, OrderApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reject {
            Some(message) => Err(OrderApiError::Rejected {
                message: message.clone(),
            }),
            None => Ok(OrderAck {
                order_id: Some("ord-1".to_string()),
                message: None,
            }),
        }
    }
}

async fn session_with(order_api: Arc<CountingOrderApi>) -> OrderSession {
    let mut session = OrderSession::new(Arc::new(StaticSource), order_api, InventoryScope::all());
    assert!(session.refresh().await);
    session.set_customer("s-1");
    session.set_quantity("p-1", 2.0);
    session.set_quantity("p-2", 1.0);
    session.set_quantity("p-3", 4.0);
    session
}

#[tokio::test]
async fn scenario_failed_submission_preserves_every_line() {
    let api = Arc::new(CountingOrderApi {
        calls: AtomicUsize::new(0),
        reject: Some("stock changed for Amoxicillin 250mg".to_string()),
    });
    let mut session = session_with(api.clone()).await;
    assert_eq!(session.lines().len(), 3);

    session.place_order();
    let outcome = session.confirm_and_submit().await;

    match outcome {
        SubmitOutcome::Failed(message) => {
            assert_eq!(message, "stock changed for Amoxicillin 250mg");
        }
        other => panic!("expected Failed, got {other:?}"),
    }

    // All three lines survive the failure unchanged.
    assert_eq!(session.lines().len(), 3);
    assert_eq!(session.cart().quantity("p-1"), 2);
    assert_eq!(session.cart().quantity("p-2"), 1);
    assert_eq!(session.cart().quantity("p-3"), 4);
    assert!(matches!(session.flow_state(), SubmitState::Failed { .. }));
    // Availability may be the reason: the session asks for a refetch.
    assert!(session.needs_refresh());
}

#[tokio::test]
async fn scenario_successful_submission_clears_every_line() {
    let api = Arc::new(CountingOrderApi {
        calls: AtomicUsize::new(0),
        reject: None,
    });
    let mut session = session_with(api.clone()).await;

    session.place_order();
    let outcome = session.confirm_and_submit().await;

    assert!(matches!(outcome, SubmitOutcome::Succeeded(_)));
    assert_eq!(session.lines().len(), 0, "no non-zero lines may remain");
    assert_eq!(session.cart().total_quantity(), 0);
    assert!(session.needs_refresh(), "implied stock changed server-side");
}
