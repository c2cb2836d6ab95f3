//! Checkout flow: recipient validation, the session state machine and the
//! driver that connects it to the payment provider.

pub mod driver;
pub mod recipient;
pub mod session;

pub use driver::{CheckoutDriver, PaymentResolution};
pub use recipient::{MAX_PHONE_DIGITS, RecipientError, RecipientInfo, sanitize_phone_input};
pub use session::{CheckoutSession, CheckoutStep, Transition};
