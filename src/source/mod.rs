mod helper;
mod types;

use helper::*;

pub use helper::parse_timestamp;
pub use types::*;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::address::Address;
use crate::error::FetchError;
use crate::network::{BalanceFlavor, NetworkMeta, AGENT_HEALTH_PATH, CORE_HEALTH_PATH};

/// Issues one GET against a path relative to the API base and returns the
/// decoded JSON body.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError>;
}

/// reqwest-backed transport. One connection pool shared by every card.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// `api_base` may be absolute (`https://host/api`) or relative (`/api`);
    /// relative bases are resolved against `origin`.
    pub fn new(api_base: &str, origin: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: resolve_base_url(api_base, origin),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Join a possibly-relative API base onto an origin
pub fn resolve_base_url(api_base: &str, origin: &str) -> String {
    let base = api_base.trim_end_matches('/');
    if base.starts_with("http://") || base.starts_with("https://") {
        base.to_string()
    } else {
        format!(
            "{}/{}",
            origin.trim_end_matches('/'),
            base.trim_start_matches('/')
        )
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "Request timed out".to_string()
    } else if err.is_connect() {
        format!("Connection failed: {err}")
    } else {
        format!("Request failed: {err}")
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, ?query, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::transport(describe_transport_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::http(status.as_u16(), extract_detail(&body)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::decode(e.to_string()))
    }
}

/// Typed access to the backend endpoints. Cheap to clone; every clone shares
/// the same transport.
///
/// Never retries; retrying is a card operation.
#[derive(Clone)]
pub struct DataSourceClient {
    transport: Arc<dyn Transport>,
}

impl DataSourceClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch one resource, substituting `address` into `template`
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        template: &str,
        address: &Address,
        params: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let path = render_path(template, address.as_str());
        let value = self.transport.get(&path, params).await?;
        serde_json::from_value(value).map_err(|e| FetchError::decode(e.to_string()))
    }

    pub async fn fetch_balance(
        &self,
        meta: &NetworkMeta,
        address: &Address,
    ) -> Result<BalanceRecord, FetchError> {
        match meta.balance_flavor {
            BalanceFlavor::Explorer => self
                .fetch::<ExplorerBalanceWire>(meta.balance_path, address, &[])
                .await?
                .try_into(),
            BalanceFlavor::Agent => self
                .fetch::<AgentBalanceWire>(meta.balance_path, address, &[])
                .await?
                .try_into(),
        }
    }

    /// Recent transactions, in the order the backend returned them.
    /// Balance-only sources yield an empty list without a request.
    pub async fn fetch_transactions(
        &self,
        meta: &NetworkMeta,
        address: &Address,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, FetchError> {
        let Some(template) = meta.txs_path else {
            return Ok(Vec::new());
        };

        let rows: Vec<TxWire> = self
            .fetch(template, address, &[("limit", limit.to_string())])
            .await?;

        rows.into_iter().map(TransactionRecord::try_from).collect()
    }

    pub async fn core_health(&self) -> Result<CoreHealth, FetchError> {
        let value = self.transport.get(CORE_HEALTH_PATH, &[]).await?;
        serde_json::from_value(value).map_err(|e| FetchError::decode(e.to_string()))
    }

    pub async fn agent_health(&self) -> Result<AgentHealth, FetchError> {
        let value = self.transport.get(AGENT_HEALTH_PATH, &[]).await?;
        serde_json::from_value(value).map_err(|e| FetchError::decode(e.to_string()))
    }
}
