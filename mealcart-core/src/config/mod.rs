//! Configuration types for Mealcart.
//!
//! These types represent the validated runtime configuration consumed by
//! the core. Loading and parsing the config file is handled by the binary.

use std::time::Duration;
use url::Url;

/// Default remote catalog root.
pub const DEFAULT_CATALOG_URL: &str = "https://www.themealdb.com/api/json/v1/1/";

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub catalog: CatalogConfig,
    pub payment: PaymentConfig,
}

/// Remote catalog access.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Root URL the endpoint paths are joined onto. Always ends with `/`.
    pub base_url: Url,
    /// Upper bound for a single catalog request.
    pub request_timeout: Duration,
}

impl CatalogConfig {
    /// Create a catalog config, appending the trailing `/` the endpoint
    /// joins rely on when it is missing.
    pub fn new(mut base_url: Url, request_timeout: Duration) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            request_timeout,
        }
    }
}

/// Payment provider settings.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Public merchant key passed to the provider.
    pub key_id: String,
    /// ISO 4217 code of the local currency.
    pub currency: String,
    /// Order description shown on the provider's sheet.
    pub description: String,
    pub theme_color: String,
    /// How long to wait for the provider's outcome callback. `None` waits
    /// until the provider answers or drops the callback.
    pub outcome_timeout: Option<Duration>,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            key_id: String::new(),
            currency: "INR".to_string(),
            description: "Food Order".to_string(),
            theme_color: "#FC7303".to_string(),
            outcome_timeout: None,
        }
    }
}
