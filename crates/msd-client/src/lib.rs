//! msd-client
//!
//! HTTP implementation of the source and order API boundaries against the
//! remote portal service.
//!
//! The client returns **raw** JSON bodies for the three read endpoints —
//! envelope unwrapping and tolerant decoding belong to msd-source, applied
//! uniformly regardless of transport. Authentication/session handling is the
//! caller's concern (inject a pre-configured `reqwest::Client` if headers are
//! needed); this crate only knows paths, queries, and error mapping.

use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;

use msd_schemas::{OrderAck, OrderRequest};
use msd_source::api::{InventoryScope, SourceApi, SourceFetchError};
use msd_submit::{OrderApi, OrderApiError};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Transport configuration for the portal client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the portal API, e.g. `https://portal.example.com/api`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(15),
        }
    }
}

// ---------------------------------------------------------------------------
// PortalClient
// ---------------------------------------------------------------------------

/// Thin `reqwest`-backed client for the portal's read and write endpoints.
#[derive(Debug, Clone)]
pub struct PortalClient {
    http: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("building portal http client")?;
        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Build a client around an existing `reqwest::Client` (e.g. one already
    /// carrying auth headers from the session layer).
    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, SourceFetchError> {
        let url = self.url(path);
        let resp = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| SourceFetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(SourceFetchError::Status {
                code: status.as_u16(),
                message,
            });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| SourceFetchError::Decode(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// SourceApi
// ---------------------------------------------------------------------------

#[async_trait::async_trait]
impl SourceApi for PortalClient {
    async fn fetch_products(&self) -> Result<Value, SourceFetchError> {
        self.get_json("products", &[]).await
    }

    async fn fetch_inventory(
        &self,
        scope: &InventoryScope,
    ) -> Result<Value, SourceFetchError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(supplier) = &scope.supplier {
            query.push(("supplier", supplier.clone()));
        }
        if scope.low_stock {
            query.push(("lowStock", "true".to_string()));
        }
        self.get_json("inventory", &query).await
    }

    async fn fetch_stock(&self) -> Result<Value, SourceFetchError> {
        self.get_json("stocks", &[]).await
    }
}

// ---------------------------------------------------------------------------
// OrderApi
// ---------------------------------------------------------------------------

#[async_trait::async_trait]
impl OrderApi for PortalClient {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderAck, OrderApiError> {
        let url = self.url("orders");
        let resp = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| OrderApiError::Transport(e.to_string()))?;

        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);

        if status.is_success() {
            // Tolerate ack shapes we don't fully recognize; the order stands
            // server-side either way.
            let ack = serde_json::from_value::<OrderAck>(body.clone()).unwrap_or(OrderAck {
                order_id: None,
                message: None,
            });
            return Ok(ack);
        }

        // The failure body's message is the user-facing wording when present.
        match body.get("message").and_then(Value::as_str) {
            Some(message) => {
                tracing::warn!(status = status.as_u16(), message, "order rejected");
                Err(OrderApiError::Rejected {
                    message: message.to_string(),
                })
            }
            None => Err(OrderApiError::Transport(format!(
                "order creation failed with status {}",
                status.as_u16()
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests (httpmock, no live network)
// ---------------------------------------------------------------------------
