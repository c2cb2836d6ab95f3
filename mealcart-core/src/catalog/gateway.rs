//! Access to the remote catalog.
//!
//! [`CatalogGateway`] is the seam between the store and the network. The
//! HTTP implementation wraps the SDK [`CatalogClient`]; tests substitute
//! scripted gateways.

use async_trait::async_trait;
use mealcart_sdk::client::{CatalogClient, ClientError};
use thiserror::Error;
use tracing::debug;

use super::CatalogItem;
use crate::config::CatalogConfig;

/// Errors that can occur while talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure, timeout, bad URL or non-2xx status.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be parsed.
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<ClientError> for CatalogError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Json(e) => CatalogError::Decode(e.to_string()),
            ClientError::Http(e) if e.is_decode() => CatalogError::Decode(e.to_string()),
            other => CatalogError::Network(other.to_string()),
        }
    }
}

/// Contract of the remote catalog.
///
/// Calls are single-shot; retry and fallback policy belong to the caller.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Items whose name matches `query`. An empty query lists every item.
    async fn search(&self, query: &str) -> Result<Vec<CatalogItem>, CatalogError>;

    /// The item with the given identifier, if the catalog knows it.
    async fn lookup_by_id(&self, id: &str) -> Result<Option<CatalogItem>, CatalogError>;
}

/// [`CatalogGateway`] backed by the catalog's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCatalogGateway {
    client: CatalogClient,
}

impl HttpCatalogGateway {
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }

    /// Build a gateway from configuration, applying the request timeout.
    pub fn from_config(config: &CatalogConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self::new(CatalogClient::new(config.base_url.clone()).with_http_client(http))
    }
}

#[async_trait]
impl CatalogGateway for HttpCatalogGateway {
    async fn search(&self, query: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        let response = self.client.search(query).await?;
        debug!(query, count = response.meals.len(), "Catalog search returned");
        Ok(response.meals.into_iter().map(CatalogItem::from).collect())
    }

    async fn lookup_by_id(&self, id: &str) -> Result<Option<CatalogItem>, CatalogError> {
        let response = self.client.lookup(id).await?;
        Ok(response.meals.into_iter().next().map(CatalogItem::from))
    }
}
