//! Scriptable source API double.

use std::sync::Mutex;

use serde_json::{json, Value};

use msd_source::api::{InventoryScope, SourceApi, SourceFetchError};

/// One endpoint's scripted behavior: a raw body, or a transport failure.
#[derive(Debug, Clone)]
enum Script {
    Body(Value),
    Fail(String),
}

/// In-process [`SourceApi`] double.
///
/// Each endpoint starts as an empty array; tests replace the body (any
/// envelope shape) or script a transport failure. The last inventory scope
/// seen is recorded for assertions.
pub struct MockSourceApi {
    products: Mutex<Script>,
    inventory: Mutex<Script>,
    stock: Mutex<Script>,
    last_scope: Mutex<Option<InventoryScope>>,
}

impl Default for MockSourceApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSourceApi {
    pub fn new() -> Self {
        Self {
            products: Mutex::new(Script::Body(json!([]))),
            inventory: Mutex::new(Script::Body(json!([]))),
            stock: Mutex::new(Script::Body(json!([]))),
            last_scope: Mutex::new(None),
        }
    }

    pub fn set_products(&self, body: Value) {
        *self.products.lock().unwrap() = Script::Body(body);
    }

    pub fn set_inventory(&self, body: Value) {
        *self.inventory.lock().unwrap() = Script::Body(body);
    }

    pub fn set_stock(&self, body: Value) {
        *self.stock.lock().unwrap() = Script::Body(body);
    }

    pub fn fail_products(&self, message: impl Into<String>) {
        *self.products.lock().unwrap() = Script::Fail(message.into());
    }

    pub fn fail_inventory(&self, message: impl Into<String>) {
        *self.inventory.lock().unwrap() = Script::Fail(message.into());
    }

    pub fn fail_stock(&self, message: impl Into<String>) {
        *self.stock.lock().unwrap() = Script::Fail(message.into());
    }

    /// The scope of the most recent inventory fetch.
    pub fn last_scope(&self) -> Option<InventoryScope> {
        self.last_scope.lock().unwrap().clone()
    }

    fn run(script: &Mutex<Script>) -> Result<Value, SourceFetchError> {
        match &*script.lock().unwrap() {
            Script::Body(body) => Ok(body.clone()),
            Script::Fail(message) => Err(SourceFetchError::Transport(message.clone())),
        }
    }
}

#[async_trait::async_trait]
impl SourceApi for MockSourceApi {
    async fn fetch_products(&self) -> Result<Value, SourceFetchError> {
        Self::run(&self.products)
    }

    async fn fetch_inventory(
        &self,
        scope: &InventoryScope,
    ) -> Result<Value, SourceFetchError> {
        *self.last_scope.lock().unwrap() = Some(scope.clone());
        Self::run(&self.inventory)
    }

    async fn fetch_stock(&self) -> Result<Value, SourceFetchError> {
        Self::run(&self.stock)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
