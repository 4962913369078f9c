//! One user's order session: sources, catalog, cart, validation, submission.
//!
//! The session is the single wiring point the order views talk to. It owns
//! the fetch watermark, the current [`SourceSet`] and merged catalog, the
//! cart, and the submission state machine, and enforces the lifecycle rules
//! that span them:
//!
//! - the catalog is re-merged whenever an admitted fetch replaces the sources
//! - cart edits acknowledge a terminal submission state first (editing is
//!   "the next user action")
//! - every "place order" trigger re-validates against current availability,
//!   including retries after a failed submission
//! - a successful submission clears the cart and marks the sources stale; a
//!   failed one preserves the cart untouched
//!
//! All state is ephemeral and scoped to one session. Nothing is persisted.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use msd_cart::{Cart, CartLine};
use msd_catalog::SellableIndex;
use msd_schemas::money::micros_to_price;
use msd_schemas::{OrderAck, OrderItem, OrderRequest};
use msd_source::api::{InventoryScope, SourceApi};
use msd_source::watermark::{FetchTicket, FetchWatermark};
use msd_source::{load_sources, SourceSet};
use msd_validate::{validate, ValidationReport};

use crate::api::OrderApi;
use crate::flow::{BeginOutcome, OrderFlow, SubmitState};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of a "place order" trigger.
#[derive(Debug)]
pub enum PlaceOrderOutcome {
    /// Validation passed; the confirmation dialog should show this summary.
    Confirming(OrderSummary),
    /// Validation failed; the machine stayed idle. All violations are listed.
    Rejected(ValidationReport),
    /// An attempt is already in progress; the trigger was a no-op.
    AlreadyInProgress,
}

/// Result of confirming and submitting the order.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The order was accepted; the cart has been cleared and the sources
    /// marked for refetch.
    Succeeded(OrderAck),
    /// The request failed; the cart is preserved for retry. The message is
    /// the server's verbatim where available.
    Failed(String),
    /// No confirmation was pending (duplicate trigger); nothing was sent.
    Ignored,
}

/// Snapshot shown in the confirmation dialog.
#[derive(Debug, Clone)]
pub struct OrderSummary {
    pub customer: String,
    pub lines: Vec<CartLine>,
    pub total_quantity: i64,
    pub subtotal_micros: i64,
}

// ---------------------------------------------------------------------------
// OrderSession
// ---------------------------------------------------------------------------

/// Session-scoped ordering state for one view instance.
pub struct OrderSession {
    source_api: Arc<dyn SourceApi>,
    order_api: Arc<dyn OrderApi>,
    scope: InventoryScope,
    customer: Option<String>,
    watermark: FetchWatermark,
    sources: SourceSet,
    catalog: SellableIndex,
    cart: Cart,
    flow: OrderFlow,
    needs_refresh: bool,
}

impl OrderSession {
    pub fn new(
        source_api: Arc<dyn SourceApi>,
        order_api: Arc<dyn OrderApi>,
        scope: InventoryScope,
    ) -> Self {
        Self {
            source_api,
            order_api,
            scope,
            customer: None,
            watermark: FetchWatermark::new(),
            sources: SourceSet::empty(),
            catalog: SellableIndex::default(),
            cart: Cart::new(),
            flow: OrderFlow::new(),
            needs_refresh: true,
        }
    }

    // --- sources & catalog -------------------------------------------------

    /// Register the start of a fetch. Pair with [`apply_fetch`]; a ticket
    /// superseded by a newer `begin_fetch` will be discarded on apply.
    ///
    /// [`apply_fetch`]: OrderSession::apply_fetch
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.watermark.begin()
    }

    /// Apply a completed fetch if it is still the most recent one.
    ///
    /// Returns `true` when the sources were replaced and the catalog
    /// re-merged; `false` when the result was stale and discarded.
    pub fn apply_fetch(&mut self, ticket: &FetchTicket, set: SourceSet) -> bool {
        if !self.watermark.admit(ticket).is_admitted() {
            tracing::debug!(
                generation = ticket.generation(),
                "discarding superseded source fetch"
            );
            return false;
        }
        self.sources = set;
        self.catalog = SellableIndex::build(
            &self.sources.products,
            &self.sources.inventory,
            &self.sources.stock,
        );
        self.needs_refresh = false;
        true
    }

    /// Fetch all three sources and apply the result (last-request-wins).
    pub async fn refresh(&mut self) -> bool {
        let ticket = self.begin_fetch();
        let set = load_sources(self.source_api.as_ref(), &self.scope).await;
        self.apply_fetch(&ticket, set)
    }

    /// `true` after a submission resolved (either way) until the next
    /// successful [`refresh`][OrderSession::refresh]: availability implied by
    /// the sources may have changed.
    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    pub fn catalog(&self) -> &SellableIndex {
        &self.catalog
    }

    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    // --- customer ----------------------------------------------------------

    pub fn set_customer(&mut self, id: impl Into<String>) {
        self.customer = Some(id.into());
    }

    pub fn customer(&self) -> Option<&str> {
        self.customer.as_deref()
    }

    // --- cart --------------------------------------------------------------

    /// Editing the cart is a user action: a terminal submission state is
    /// acknowledged back to idle before the edit lands.
    fn touch(&mut self) {
        self.flow.acknowledge();
    }

    pub fn add_one(&mut self, product_id: &str) {
        self.touch();
        self.cart.add_one(product_id);
    }

    pub fn remove_one(&mut self, product_id: &str) {
        self.touch();
        self.cart.remove_one(product_id);
    }

    pub fn set_quantity(&mut self, product_id: &str, requested: f64) {
        self.touch();
        self.cart.set_quantity(product_id, requested);
    }

    pub fn remove(&mut self, product_id: &str) {
        self.touch();
        self.cart.remove(product_id);
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn lines(&self) -> Vec<CartLine> {
        self.cart.lines(&self.catalog)
    }

    pub fn subtotal_micros(&self) -> i64 {
        self.cart.subtotal_micros(&self.catalog)
    }

    // --- submission --------------------------------------------------------

    pub fn flow_state(&self) -> &SubmitState {
        self.flow.state()
    }

    /// The "place order" trigger. Re-validates against the **current**
    /// catalog on every call — including a retry after a failed submission,
    /// so a refetch between attempts is picked up.
    pub fn place_order(&mut self) -> PlaceOrderOutcome {
        if self.flow.state().is_terminal() {
            self.flow.acknowledge();
        }
        let report = validate(&self.cart, &self.catalog, self.customer.as_deref());
        match self.flow.begin(report) {
            BeginOutcome::Entered => PlaceOrderOutcome::Confirming(self.order_summary()),
            BeginOutcome::Blocked(report) => {
                tracing::info!(
                    violations = report.violations.len(),
                    "order blocked by validation"
                );
                PlaceOrderOutcome::Rejected(report)
            }
            BeginOutcome::Ignored => PlaceOrderOutcome::AlreadyInProgress,
        }
    }

    /// The summary shown in the confirmation dialog, derived live.
    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary {
            customer: self.customer.clone().unwrap_or_default(),
            lines: self.lines(),
            total_quantity: self.cart.total_quantity(),
            subtotal_micros: self.subtotal_micros(),
        }
    }

    /// Cancel the confirmation dialog; returns to idle without side effects.
    pub fn cancel_confirmation(&mut self) -> bool {
        self.flow.cancel()
    }

    /// Dismissing the result toast.
    pub fn acknowledge(&mut self) -> bool {
        self.flow.acknowledge()
    }

    /// User confirmed the summary dialog: serialize the cart and submit.
    ///
    /// Exactly one request is sent per pending confirmation; calls without
    /// one (including while a submission is in flight) return
    /// [`SubmitOutcome::Ignored`] without touching the wire.
    pub async fn confirm_and_submit(&mut self) -> SubmitOutcome {
        let Some(grant) = self.flow.take_submission() else {
            return SubmitOutcome::Ignored;
        };

        let request = self.build_order_request();
        tracing::info!(
            customer = %request.customer,
            items = request.items.len(),
            total_price = request.total_price,
            "submitting order"
        );

        match self.order_api.create_order(&request).await {
            Ok(ack) => {
                self.flow.resolve_success(grant);
                // The order stands server-side: clear every quantity and mark
                // the sources stale (their implied stock has changed).
                self.cart.clear();
                self.needs_refresh = true;
                tracing::info!(order_id = ?ack.order_id, "order accepted");
                SubmitOutcome::Succeeded(ack)
            }
            Err(err) => {
                let message = err.user_message();
                // Cart untouched: the user's selections are preserved so they
                // can adjust and retry from the current cart.
                self.flow.resolve_failure(grant, message.clone());
                self.needs_refresh = true;
                tracing::warn!(%err, "order submission failed");
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Serialize the order-creation payload from the current non-zero lines.
    ///
    /// Built fresh on every attempt: prices come from the catalog at this
    /// instant, never from anything cached at add time. Unpriced lines cannot
    /// occur here — validation gates the transition into `Confirming`.
    fn build_order_request(&self) -> OrderRequest {
        let lines = self.lines();
        let items: Vec<OrderItem> = lines
            .iter()
            .filter_map(|line| {
                line.unit_price_micros.map(|price_micros| OrderItem {
                    product_id: line.product_id.clone(),
                    quantity: line.quantity as i64,
                    price: micros_to_price(price_micros),
                })
            })
            .collect();
        OrderRequest {
            // Validation guarantees a customer before Confirming is reachable.
            customer: self.customer.clone().unwrap_or_default(),
            items,
            total_price: micros_to_price(self.subtotal_micros()),
            client_ref: Uuid::new_v4(),
            placed_at: Utc::now(),
        }
    }
}
