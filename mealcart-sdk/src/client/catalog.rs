//! Catalog API client (storefront → remote food database).

use reqwest::Client;
use url::Url;

use super::ClientError;
use crate::objects::catalog::{LookupQuery, MealsResponse, SearchQuery};

/// Typed HTTP client for the remote catalog.
///
/// Every call is single-shot: no retries, no caching. Both endpoints answer
/// with a [`MealsResponse`] envelope.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new `CatalogClient`.
    ///
    /// `base_url` must end with `/` (e.g.
    /// `https://www.themealdb.com/api/json/v1/1/`) since endpoint paths are
    /// joined relative to it.
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET search.php?s={term}` – meals whose name matches `term`. An empty
    /// term lists the whole catalog.
    pub async fn search(&self, term: &str) -> Result<MealsResponse, ClientError> {
        let url = self.base_url.join("search.php")?;

        let resp = self
            .http
            .get(url)
            .query(&SearchQuery { term })
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `GET lookup.php?i={id}` – the meal with the given identifier, if any.
    pub async fn lookup(&self, id: &str) -> Result<MealsResponse, ClientError> {
        let url = self.base_url.join("lookup.php")?;

        let resp = self
            .http
            .get(url)
            .query(&LookupQuery { id })
            .send()
            .await?;

        parse_response(resp).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}
