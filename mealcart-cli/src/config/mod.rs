//! Configuration module for the mealcart binary.
//!
//! Handles loading configuration from the TOML file and CLI overrides, and
//! converts it into the core's validated runtime types.

pub mod file;

use crate::config::file::{
    CatalogConfig as FileCatalogConfig, FileConfig, PaymentConfig as FilePaymentConfig,
};
use mealcart_core::config::{CatalogConfig, PaymentConfig, StorefrontConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    catalog_url_override: Option<Url>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, catalog_url_override: Option<Url>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            catalog_url_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file, falling back to defaults when it is missing
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    /// 4. Build the runtime configuration
    pub fn load(&self) -> Result<StorefrontConfig, ConfigError> {
        let mut file_config = match std::fs::read_to_string(&self.config_path) {
            Ok(content) => toml::from_str::<FileConfig>(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    path = %self.config_path.display(),
                    "Config file not found, using defaults"
                );
                FileConfig::default()
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(url) = &self.catalog_url_override {
            file_config.catalog.base_url = url.clone();
        }

        validate(&file_config)?;

        Ok(StorefrontConfig {
            catalog: convert_catalog(file_config.catalog),
            payment: convert_payment(file_config.payment),
        })
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    let scheme = config.catalog.base_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::ValidationError(format!(
            "catalog base_url must be http or https, got {scheme}"
        )));
    }
    if config.catalog.request_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "catalog request_timeout_secs must be greater than zero".to_string(),
        ));
    }
    let currency = &config.payment.currency;
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ConfigError::ValidationError(format!(
            "payment currency must be a three-letter code, got {currency:?}"
        )));
    }
    if config.payment.outcome_timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "payment outcome_timeout_secs must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn convert_catalog(c: FileCatalogConfig) -> CatalogConfig {
    CatalogConfig::new(c.base_url, Duration::from_secs(c.request_timeout_secs))
}

fn convert_payment(p: FilePaymentConfig) -> PaymentConfig {
    PaymentConfig {
        key_id: p.key_id,
        currency: p.currency.to_ascii_uppercase(),
        description: p.description,
        theme_color: p.theme_color,
        outcome_timeout: p.outcome_timeout_secs.map(Duration::from_secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "mealcart-{name}-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let loader = ConfigLoader::new("/nonexistent/mealcart.toml", None);
        let config = loader.load().unwrap();
        assert_eq!(
            config.catalog.base_url.as_str(),
            mealcart_core::config::DEFAULT_CATALOG_URL
        );
        assert_eq!(config.catalog.request_timeout, Duration::from_secs(15));
        assert_eq!(config.payment.currency, "INR");
    }

    #[test]
    fn test_cli_override_wins() {
        let path = write_config("override", "[catalog]\nbase_url = \"https://a.example/\"\n");
        let url = Url::parse("http://localhost:8080/api").unwrap();
        let config = ConfigLoader::new(&path, Some(url)).load().unwrap();
        assert_eq!(config.catalog.base_url.as_str(), "http://localhost:8080/api/");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_validation_errors() {
        let path = write_config("bad-currency", "[payment]\ncurrency = \"RUPEES\"\n");
        let result = ConfigLoader::new(&path, None).load();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
        std::fs::remove_file(path).unwrap();

        let path = write_config("bad-timeout", "[catalog]\nrequest_timeout_secs = 0\n");
        let result = ConfigLoader::new(&path, None).load();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
        std::fs::remove_file(path).unwrap();

        let path = write_config("bad-scheme", "[catalog]\nbase_url = \"ftp://a.example/\"\n");
        let result = ConfigLoader::new(&path, None).load();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_parse_error() {
        let path = write_config("garbled", "[catalog\n");
        let result = ConfigLoader::new(&path, None).load();
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
        std::fs::remove_file(path).unwrap();
    }
}
