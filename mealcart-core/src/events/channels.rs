//! Payment outcome channel.
//!
//! The provider receives a [`PaymentCallback`] when the payment is opened
//! and resolves it once the real outcome is known. The driver waits on the
//! matching [`PaymentHandle`].

use super::types::PaymentOutcome;
use crate::payment::PaymentError;
use tokio::sync::oneshot;

/// Provider-side end of a payment outcome channel.
///
/// `resolve` consumes the callback, so an outcome is delivered at most once.
/// Dropping it unresolved makes the waiting side observe a failure.
#[derive(Debug)]
pub struct PaymentCallback {
    tx: oneshot::Sender<PaymentOutcome>,
}

/// Driver-side end of a payment outcome channel.
#[derive(Debug)]
pub struct PaymentHandle {
    rx: oneshot::Receiver<PaymentOutcome>,
}

/// Create a new payment outcome channel.
///
/// Returns a (callback, handle) pair for one payment attempt.
pub fn payment_outcome_channel() -> (PaymentCallback, PaymentHandle) {
    let (tx, rx) = oneshot::channel();
    (PaymentCallback { tx }, PaymentHandle { rx })
}

impl PaymentCallback {
    /// Deliver the outcome. Returns `false` if nobody is waiting anymore.
    pub fn resolve(self, outcome: PaymentOutcome) -> bool {
        self.tx.send(outcome).is_ok()
    }

    pub fn succeed(self, payment_id: impl Into<String>) -> bool {
        self.resolve(PaymentOutcome::Succeeded {
            payment_id: payment_id.into(),
        })
    }

    pub fn fail(self, reason: impl Into<String>) -> bool {
        self.resolve(PaymentOutcome::Failed {
            reason: reason.into(),
        })
    }

    /// Whether the waiting side has gone away.
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_closed()
    }
}

impl PaymentHandle {
    /// Wait for the provider's outcome.
    pub async fn outcome(self) -> Result<PaymentOutcome, PaymentError> {
        self.rx.await.map_err(|_| PaymentError::CallbackDropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_outcome_is_delivered() {
        let (callback, handle) = payment_outcome_channel();
        assert!(callback.succeed("pay_1"));
        assert_eq!(
            handle.outcome().await.unwrap(),
            PaymentOutcome::Succeeded {
                payment_id: "pay_1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_dropped_callback_is_an_error() {
        let (callback, handle) = payment_outcome_channel();
        drop(callback);
        assert!(matches!(
            handle.outcome().await,
            Err(PaymentError::CallbackDropped)
        ));
    }

    #[test]
    fn test_resolving_after_handle_dropped() {
        let (callback, handle) = payment_outcome_channel();
        drop(handle);
        assert!(callback.is_abandoned());
        assert!(!callback.fail("too late"));
    }
}
