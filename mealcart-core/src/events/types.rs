//! Event type definitions for the checkout flow.
//!
//! Synchronous user actions arrive as [`CheckoutEvent`]s. The payment
//! provider reports asynchronously with a [`PaymentOutcome`].

use crate::catalog::CatalogItem;
use crate::checkout::RecipientInfo;

/// A user-level action that may advance the checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutEvent {
    /// An item was picked from a listing.
    ItemSelected(CatalogItem),
    /// The user navigated back from the detail screen.
    Back,
    /// "Add to cart" on the detail screen.
    AddToCart,
    /// The address form was submitted with a validated recipient.
    RecipientSubmitted(RecipientInfo),
}

impl CheckoutEvent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutEvent::ItemSelected(_) => "item_selected",
            CheckoutEvent::Back => "back",
            CheckoutEvent::AddToCart => "add_to_cart",
            CheckoutEvent::RecipientSubmitted(_) => "recipient_submitted",
        }
    }
}

/// Final result of a payment, as delivered by the provider's callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The provider captured the payment.
    Succeeded { payment_id: String },
    /// The provider reported a failure or the user cancelled.
    Failed { reason: String },
}
