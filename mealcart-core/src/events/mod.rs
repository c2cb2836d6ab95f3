//! Events exchanged between the UI layer, the checkout driver and the
//! payment provider.
//!
//! # Event Flow
//!
//! 1. The UI emits `CheckoutEvent`s -> `CheckoutDriver`
//! 2. `CheckoutDriver` opens a payment with a `PaymentCallback`
//! 3. The provider resolves the callback with a `PaymentOutcome`
//! 4. `CheckoutDriver` resets the session or rolls back to the address step

pub mod channels;
pub mod types;

pub use channels::{PaymentCallback, PaymentHandle, payment_outcome_channel};
pub use types::{CheckoutEvent, PaymentOutcome};
