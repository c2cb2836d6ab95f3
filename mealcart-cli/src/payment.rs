//! Simulated payment provider for exercising checkouts from the command line.
//!
//! The provider "opens" a checkout by logging the request, then resolves the
//! outcome callback after a short delay, the way a hosted payment sheet
//! reports back once the user has finished with it.

use async_trait::async_trait;
use clap::ValueEnum;
use mealcart_core::events::PaymentCallback;
use mealcart_core::payment::{PaymentError, PaymentProvider};
use mealcart_sdk::objects::PaymentRequest;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

/// What the simulated payer does with one payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SimulatedOutcome {
    /// The payment is captured.
    Success,
    /// The provider declines the payment.
    Failure,
    /// The payer closes the sheet; no outcome is ever reported.
    Abandon,
    /// The provider cannot open a checkout at all.
    Unavailable,
}

/// [`PaymentProvider`] that plays back a scripted list of outcomes.
///
/// Attempts beyond the script are abandoned.
pub struct SimulatedPaymentProvider {
    outcomes: Mutex<VecDeque<SimulatedOutcome>>,
    delay: Duration,
}

impl SimulatedPaymentProvider {
    pub fn new(outcomes: impl IntoIterator<Item = SimulatedOutcome>, delay: Duration) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            delay,
        }
    }

    fn next_outcome(&self) -> SimulatedOutcome {
        self.outcomes
            .lock()
            .map(|mut queue| queue.pop_front())
            .ok()
            .flatten()
            .unwrap_or(SimulatedOutcome::Abandon)
    }
}

#[async_trait]
impl PaymentProvider for SimulatedPaymentProvider {
    async fn initiate(
        &self,
        request: PaymentRequest,
        callback: PaymentCallback,
    ) -> Result<(), PaymentError> {
        let outcome = self.next_outcome();
        if outcome == SimulatedOutcome::Unavailable {
            return Err(PaymentError::Initiation(
                "payment provider unavailable".to_string(),
            ));
        }

        info!(
            reference = %request.reference,
            amount = request.amount,
            currency = %request.currency,
            contact = %request.prefill.contact,
            "Payment sheet opened"
        );

        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match outcome {
                SimulatedOutcome::Success => {
                    callback.succeed(format!("pay_{}", Uuid::new_v4().simple()));
                }
                SimulatedOutcome::Failure => {
                    callback.fail("payment declined by issuer");
                }
                SimulatedOutcome::Abandon | SimulatedOutcome::Unavailable => drop(callback),
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealcart_core::events::{PaymentOutcome, payment_outcome_channel};
    use mealcart_sdk::objects::{PaymentPrefill, PaymentTheme};

    fn request() -> PaymentRequest {
        PaymentRequest {
            key: String::new(),
            amount: 76_500,
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
            reference: "ref".to_string(),
        }
    }

    #[tokio::test]
    async fn test_plays_back_script() {
        let provider = SimulatedPaymentProvider::new(
            [SimulatedOutcome::Failure, SimulatedOutcome::Success],
            Duration::ZERO,
        );

        let (callback, handle) = payment_outcome_channel();
        provider.initiate(request(), callback).await.unwrap();
        assert!(matches!(
            handle.outcome().await,
            Ok(PaymentOutcome::Failed { .. })
        ));

        let (callback, handle) = payment_outcome_channel();
        provider.initiate(request(), callback).await.unwrap();
        assert!(matches!(
            handle.outcome().await,
            Ok(PaymentOutcome::Succeeded { .. })
        ));

        // Script exhausted: the payer walks away.
        let (callback, handle) = payment_outcome_channel();
        provider.initiate(request(), callback).await.unwrap();
        assert!(matches!(
            handle.outcome().await,
            Err(PaymentError::CallbackDropped)
        ));
    }

    #[tokio::test]
    async fn test_unavailable_fails_initiation() {
        let provider =
            SimulatedPaymentProvider::new([SimulatedOutcome::Unavailable], Duration::ZERO);
        let (callback, _handle) = payment_outcome_channel();
        let result = provider.initiate(request(), callback).await;
        assert!(matches!(result, Err(PaymentError::Initiation(_))));
    }
}
