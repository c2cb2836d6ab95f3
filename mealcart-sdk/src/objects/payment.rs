//! Options handed to the hosted payment provider when opening its checkout.
//!
//! The provider only reports the outcome later, through its own callback.
//! Nothing in this request says whether the payment went through.

use serde::{Deserialize, Serialize};

/// Checkout options for the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Public merchant key identifying the account.
    pub key: String,
    /// Amount in the currency's minor unit (e.g. paise).
    pub amount: u64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Name shown on the provider's sheet.
    pub name: String,
    pub description: String,
    pub prefill: PaymentPrefill,
    pub theme: PaymentTheme,
    /// Merchant-side reference echoed back in the provider's callback.
    pub reference: String,
}

/// Payer details pre-filled into the provider's form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPrefill {
    pub name: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTheme {
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let request = PaymentRequest {
            key: "rzp_test_key".to_string(),
            amount: 76500,
            currency: "INR".to_string(),
            name: "A".to_string(),
            description: "Food Order".to_string(),
            prefill: PaymentPrefill {
                name: "A".to_string(),
                contact: "9999999999".to_string(),
            },
            theme: PaymentTheme {
                color: "#FC7303".to_string(),
            },
            reference: "order-1".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["amount"], 76500);
        assert_eq!(value["currency"], "INR");
        assert_eq!(value["prefill"]["contact"], "9999999999");
        assert_eq!(value["theme"]["color"], "#FC7303");
    }
}
