//! TOML file configuration structures.
//!
//! These structs directly map to the `mealcart.toml` file format. Every
//! field has a default, so an empty or missing file is valid.

use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub payment: PaymentConfig,
}

/// Catalog configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Root URL of the catalog API.
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(mealcart_core::config::DEFAULT_CATALOG_URL).expect("valid default catalog url")
}

fn default_request_timeout_secs() -> u64 {
    15
}

/// Payment provider configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Public merchant key.
    #[serde(default)]
    pub key_id: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_theme_color")]
    pub theme_color: String,
    /// Seconds to wait for the provider's outcome. Unset waits forever.
    #[serde(default)]
    pub outcome_timeout_secs: Option<u64>,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            key_id: String::new(),
            currency: default_currency(),
            description: default_description(),
            theme_color: default_theme_color(),
            outcome_timeout_secs: None,
        }
    }
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_description() -> String {
    "Food Order".to_string()
}

fn default_theme_color() -> String {
    "#FC7303".to_string()
}
