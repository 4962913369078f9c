//! Full loop: load → merge → cart → validate → confirm → submit → reconcile.

use std::sync::Arc;

use msd_source::api::InventoryScope;
use msd_submit::{OrderSession, PlaceOrderOutcome, SubmitOutcome, SubmitState};
use msd_testkit::{MockOrderApi, MockSourceApi};
use serde_json::json;

fn seeded_source() -> MockSourceApi {
    let api = MockSourceApi::new();
    api.set_products(json!({"data": [
        {"_id": "p-1", "name": "Paracetamol 500mg", "tradePrice": 40.0, "mrp": 55.0},
        {"_id": "p-2", "name": "Amoxicillin 250mg", "mrp": 80.0},
        {"_id": "p-3", "name": "Cetirizine 10mg"}
    ]}));
    api.set_inventory(json!([
        {"product": "p-1", "supplier": {"_id": "s-1", "name": "MedLine"}, "availableQty": 20, "costPrice": 38.5}
    ]));
    api.set_stock(json!({"items": [
        {"product": {"_id": "p-2"}, "quantity": 8}
    ]}));
    api
}

#[tokio::test]
async fn scenario_hospital_order_happy_path() {
    let source = Arc::new(seeded_source());
    let orders = Arc::new(MockOrderApi::new());
    let mut session = OrderSession::new(
        source.clone(),
        orders.clone(),
        InventoryScope::for_supplier("s-1"),
    );

    assert!(session.refresh().await);
    assert_eq!(
        source.last_scope().unwrap().supplier.as_deref(),
        Some("s-1")
    );

    // Merged catalog: inventory beats everything for p-1, stock quantity plus
    // catalog price for p-2, p-3 is unpriced and availability-unknown.
    let catalog = session.catalog();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.get("p-1").unwrap().price_micros, Some(38_500_000));
    assert_eq!(catalog.get("p-1").unwrap().available_stock, Some(20));
    assert_eq!(catalog.get("p-2").unwrap().price_micros, Some(80_000_000));
    assert_eq!(catalog.get("p-2").unwrap().available_stock, Some(8));
    assert!(catalog.get("p-3").unwrap().price_micros.is_none());
    assert!(catalog.get("p-3").unwrap().available_stock.is_none());

    session.set_customer("s-1");
    session.set_quantity("p-1", 2.0);
    session.add_one("p-2");

    let summary = match session.place_order() {
        PlaceOrderOutcome::Confirming(summary) => summary,
        other => panic!("expected Confirming, got {other:?}"),
    };
    assert_eq!(summary.lines.len(), 2);
    assert_eq!(summary.total_quantity, 3);
    assert_eq!(summary.subtotal_micros, 2 * 38_500_000 + 80_000_000);

    let ack = match session.confirm_and_submit().await {
        SubmitOutcome::Succeeded(ack) => ack,
        other => panic!("expected Succeeded, got {other:?}"),
    };
    assert_eq!(ack.order_id.as_deref(), Some("ORD-000001"));

    // The serialized request mirrors the summary, prices at the wire in
    // currency units.
    let requests = orders.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.customer, "s-1");
    assert_eq!(request.items.len(), 2);
    assert_eq!(request.items[0].product_id, "p-1");
    assert_eq!(request.items[0].quantity, 2);
    assert!((request.items[0].price - 38.5).abs() < 1e-9);
    assert!((request.total_price - 157.0).abs() < 1e-9);

    // Reconciled local state: cart cleared, sources flagged for refetch.
    assert!(session.cart().is_empty());
    assert!(session.needs_refresh());
    assert_eq!(session.flow_state(), &SubmitState::Succeeded);

    // The next cart edit acknowledges the terminal state.
    session.add_one("p-1");
    assert_eq!(session.flow_state(), &SubmitState::Idle);
}

#[tokio::test]
async fn scenario_rejection_then_adjusted_retry() {
    let source = Arc::new(seeded_source());
    let orders = Arc::new(MockOrderApi::new());
    let mut session =
        OrderSession::new(source.clone(), orders.clone(), InventoryScope::all());

    session.refresh().await;
    session.set_customer("s-1");
    session.set_quantity("p-1", 10.0);

    orders.reject_next("insufficient stock for Paracetamol 500mg");
    session.place_order();
    match session.confirm_and_submit().await {
        SubmitOutcome::Failed(message) => {
            assert_eq!(message, "insufficient stock for Paracetamol 500mg");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(session.cart().quantity("p-1"), 10);

    // Stock shrank server-side; the refetched availability blocks the retry
    // locally until the user adjusts.
    source.set_inventory(json!([
        {"product": "p-1", "availableQty": 4, "costPrice": 38.5}
    ]));
    session.refresh().await;
    assert!(matches!(
        session.place_order(),
        PlaceOrderOutcome::Rejected(_)
    ));

    session.set_quantity("p-1", 4.0);
    assert!(matches!(
        session.place_order(),
        PlaceOrderOutcome::Confirming(_)
    ));
    assert!(matches!(
        session.confirm_and_submit().await,
        SubmitOutcome::Succeeded(_)
    ));
    assert_eq!(orders.call_count(), 2);
    assert!(session.cart().is_empty());
}
