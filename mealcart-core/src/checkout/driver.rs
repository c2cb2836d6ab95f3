//! CheckoutDriver.
//!
//! The CheckoutDriver is responsible for:
//! - Owning the single active [`CheckoutSession`]
//! - Applying user-level [`CheckoutEvent`]s to it
//! - Opening the payment with the [`PaymentProvider`] and waiting for the
//!   provider's callback
//! - Resetting the session and refreshing the catalog on success, rolling
//!   back to the address step on any failure
//! - Publishing the current step to observers
//!
//! A payment only counts as successful once the provider reports it through
//! the callback. Opening the provider's checkout is not enough.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};

use super::{CheckoutSession, CheckoutStep, Transition};
use crate::catalog::CatalogStore;
use crate::config::PaymentConfig;
use crate::events::{CheckoutEvent, PaymentHandle, PaymentOutcome, payment_outcome_channel};
use crate::observable::Observable;
use crate::payment::{PaymentError, PaymentProvider, build_payment_request};

/// How a call to [`CheckoutDriver::pay`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentResolution {
    /// The provider confirmed the payment; the session was reset.
    Completed { payment_id: String },
    /// The payment failed; the session is back on the address step with
    /// its item kept.
    ReturnedToAddress { reason: String },
    /// The session was not on the payment step; nothing happened.
    NotInPayment,
}

/// Drives one checkout session at a time.
///
/// Every mutation takes `&mut self`, so the session has exactly one owner
/// and transitions are applied in the order they are issued.
pub struct CheckoutDriver {
    session: CheckoutSession,
    store: Arc<CatalogStore>,
    provider: Arc<dyn PaymentProvider>,
    config: PaymentConfig,
    step: Observable<CheckoutStep>,
}

impl CheckoutDriver {
    /// Create a new driver with a fresh session on the browsing step.
    pub fn new(
        store: Arc<CatalogStore>,
        provider: Arc<dyn PaymentProvider>,
        config: PaymentConfig,
    ) -> Self {
        Self {
            session: CheckoutSession::new(),
            store,
            provider,
            config,
            step: Observable::new(CheckoutStep::Browsing),
        }
    }

    /// Read-only view of the active session.
    pub fn session(&self) -> &CheckoutSession {
        &self.session
    }

    /// Subscribe to step changes.
    pub fn subscribe_step(&self) -> watch::Receiver<CheckoutStep> {
        self.step.subscribe()
    }

    /// Stream of the current step, then every later one.
    pub fn step_stream(&self) -> WatchStream<CheckoutStep> {
        self.step.stream()
    }

    /// Apply a synchronous user event.
    pub fn handle(&mut self, event: CheckoutEvent) -> Transition {
        let name = event.name();
        let transition = match event {
            CheckoutEvent::ItemSelected(item) => self.session.select_item(item),
            CheckoutEvent::Back => self.session.back(),
            CheckoutEvent::AddToCart => self.session.add_to_cart(),
            CheckoutEvent::RecipientSubmitted(recipient) => {
                self.session.submit_recipient(recipient)
            }
        };
        self.record(name, transition);
        transition
    }

    /// Look an item up by id and select it.
    ///
    /// Ignored when the catalog does not know the id or the lookup fails.
    pub async fn select_item_by_id(&mut self, id: &str) -> Transition {
        match self.store.lookup(id).await {
            Some(item) => self.handle(CheckoutEvent::ItemSelected(item)),
            None => {
                debug!(id, "No catalog item to select");
                Transition::Ignored
            }
        }
    }

    /// Pay for the session's order.
    ///
    /// Opens the provider's checkout and waits for its outcome. A success
    /// resets the session and refreshes the all-items listing. An
    /// initiation error, a reported failure, a dropped callback or a
    /// timeout all return the session to the address step.
    pub async fn pay(&mut self) -> PaymentResolution {
        let (Some(recipient), Some(total)) = (self.session.recipient(), self.session.total())
        else {
            debug!(step = %self.session.step(), "Payment requested outside the payment step");
            return PaymentResolution::NotInPayment;
        };

        let session_id = self.session.id();
        let request = build_payment_request(&self.config, recipient, total, session_id);
        let (callback, handle) = payment_outcome_channel();

        info!(
            %session_id,
            amount = request.amount,
            currency = %request.currency,
            "Opening payment"
        );

        let outcome = match self.provider.initiate(request, callback).await {
            Ok(()) => self.await_outcome(handle).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(PaymentOutcome::Succeeded { payment_id }) => {
                info!(%session_id, %payment_id, "Payment succeeded");
                let transition = self.session.payment_succeeded();
                self.record("payment_succeeded", transition);
                self.store.refresh_all("").await;
                PaymentResolution::Completed { payment_id }
            }
            Ok(PaymentOutcome::Failed { reason }) => {
                warn!(%session_id, %reason, "Payment failed");
                self.roll_back(reason)
            }
            Err(e) => {
                warn!(%session_id, error = %e, "Payment did not complete");
                self.roll_back(e.to_string())
            }
        }
    }

    async fn await_outcome(&self, handle: PaymentHandle) -> Result<PaymentOutcome, PaymentError> {
        match self.config.outcome_timeout {
            Some(limit) => tokio::time::timeout(limit, handle.outcome())
                .await
                .map_err(|_| PaymentError::TimedOut)?,
            None => handle.outcome().await,
        }
    }

    fn roll_back(&mut self, reason: String) -> PaymentResolution {
        let transition = self.session.payment_failed();
        self.record("payment_failed", transition);
        PaymentResolution::ReturnedToAddress { reason }
    }

    fn record(&self, event: &'static str, transition: Transition) {
        match transition {
            Transition::Applied { from, to } => {
                info!(
                    session_id = %self.session.id(),
                    event,
                    %from,
                    %to,
                    "Checkout transition"
                );
                self.step.set(to);
            }
            Transition::Ignored => {
                debug!(
                    session_id = %self.session.id(),
                    event,
                    step = %self.session.step(),
                    "Checkout event ignored"
                );
            }
        }
    }
}
