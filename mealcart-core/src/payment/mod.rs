//! Payment provider contract.
//!
//! Opening the provider's checkout is not a payment: [`PaymentProvider::initiate`]
//! only reports whether the sheet could be opened. The actual outcome
//! arrives later through the [`PaymentCallback`] handed to the provider.

use async_trait::async_trait;
use mealcart_sdk::objects::{PaymentPrefill, PaymentRequest, PaymentTheme};
use thiserror::Error;
use uuid::Uuid;

use crate::checkout::RecipientInfo;
use crate::config::PaymentConfig;
use crate::events::PaymentCallback;
use crate::price::to_minor_units;

/// Errors that end a payment attempt without a provider outcome.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The provider refused to open the payment (e.g. malformed request).
    #[error("payment initiation failed: {0}")]
    Initiation(String),

    /// The provider dropped the callback without reporting an outcome.
    #[error("payment provider never reported an outcome")]
    CallbackDropped,

    /// No outcome arrived within the configured timeout.
    #[error("timed out waiting for payment outcome")]
    TimedOut,
}

/// A hosted payment provider.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Open the provider's checkout for `request`.
    ///
    /// Returning `Ok(())` means the checkout was opened, nothing more. The
    /// provider must eventually resolve or drop `callback`.
    async fn initiate(
        &self,
        request: PaymentRequest,
        callback: PaymentCallback,
    ) -> Result<(), PaymentError>;
}

/// Build the provider request for a checkout total in the local currency.
pub fn build_payment_request(
    config: &PaymentConfig,
    recipient: &RecipientInfo,
    total: u32,
    reference: Uuid,
) -> PaymentRequest {
    PaymentRequest {
        key: config.key_id.clone(),
        amount: to_minor_units(total),
        currency: config.currency.clone(),
        name: recipient.name().to_string(),
        description: config.description.clone(),
        prefill: PaymentPrefill {
            name: recipient.name().to_string(),
            contact: recipient.phone().to_string(),
        },
        theme: PaymentTheme {
            color: config.theme_color.clone(),
        },
        reference: reference.to_string(),
    }
}
