//! Subcommand implementations.

use crate::payment::{SimulatedOutcome, SimulatedPaymentProvider};
use anyhow::{Context, bail};
use mealcart_core::catalog::{CatalogItem, CatalogStore, RefreshOutcome};
use mealcart_core::checkout::{
    CheckoutDriver, MAX_PHONE_DIGITS, PaymentResolution, RecipientInfo, sanitize_phone_input,
};
use mealcart_core::config::PaymentConfig;
use mealcart_core::events::CheckoutEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::StreamExt;

/// Inputs of the `checkout` subcommand.
pub struct CheckoutRequest {
    pub item_id: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub outcomes: Vec<SimulatedOutcome>,
    pub payment_delay: Duration,
}

pub async fn browse(store: &CatalogStore, query: &str) -> anyhow::Result<()> {
    report_refresh(store.refresh_all(query).await);
    print_items(&store.all_items());
    Ok(())
}

pub async fn search(store: &CatalogStore, query: &str) -> anyhow::Result<()> {
    if query.trim().is_empty() {
        bail!("search query must not be blank");
    }
    report_refresh(store.search(query).await);
    println!("Results for \"{query}\"");
    print_items(&store.search_items());
    Ok(())
}

pub async fn lookup(store: &CatalogStore, id: &str) -> anyhow::Result<()> {
    let item = store
        .lookup(id)
        .await
        .with_context(|| format!("no catalog item with id {id}"))?;
    print_items(std::slice::from_ref(&item));
    println!("  thumbnail: {}", item.thumbnail_url());
    Ok(())
}

/// Run a full checkout against the simulated payment provider.
///
/// Each failed payment sends the session back to the address step, where the
/// same recipient is submitted again for the next scripted attempt.
pub async fn checkout(
    store: Arc<CatalogStore>,
    config: PaymentConfig,
    request: CheckoutRequest,
) -> anyhow::Result<()> {
    let attempts = request.outcomes.len().max(1);
    let provider = Arc::new(SimulatedPaymentProvider::new(
        request.outcomes,
        request.payment_delay,
    ));
    let mut driver = CheckoutDriver::new(store, provider, config);

    let mut steps = driver.step_stream();
    tokio::spawn(async move {
        while let Some(step) = steps.next().await {
            tracing::debug!(%step, "Checkout step");
        }
    });

    if !driver.select_item_by_id(&request.item_id).await.is_applied() {
        bail!("no catalog item with id {}", request.item_id);
    }
    if let Some(item) = driver.session().selected_item() {
        print_items(std::slice::from_ref(item));
    }
    driver.handle(CheckoutEvent::AddToCart);

    let Some(phone) = sanitize_phone_input(&request.phone) else {
        bail!(
            "invalid delivery details: phone input is longer than {MAX_PHONE_DIGITS} characters"
        );
    };
    let recipient = RecipientInfo::new(&request.name, &phone, &request.address)
        .context("invalid delivery details")?;

    for attempt in 1..=attempts {
        driver.handle(CheckoutEvent::RecipientSubmitted(recipient.clone()));
        if let Some(total) = driver.session().total() {
            println!("Order total: ₹{total} (attempt {attempt}/{attempts})");
        }

        match driver.pay().await {
            PaymentResolution::Completed { payment_id } => {
                println!("Payment confirmed: {payment_id}");
                return Ok(());
            }
            PaymentResolution::ReturnedToAddress { reason } => {
                println!("Payment failed: {reason}");
            }
            PaymentResolution::NotInPayment => {
                bail!("checkout is on the {} step, not payment", driver.session().step());
            }
        }
    }

    bail!("payment did not go through after {attempts} attempt(s)")
}

fn report_refresh(outcome: RefreshOutcome) {
    match outcome {
        RefreshOutcome::Applied(_) => {}
        RefreshOutcome::FellBack => {
            tracing::warn!("Catalog unavailable, showing no results");
        }
        RefreshOutcome::Superseded => {
            tracing::debug!("Refresh superseded by a newer request");
        }
    }
}

fn print_items(items: &[CatalogItem]) {
    if items.is_empty() {
        println!("No items.");
        return;
    }
    for item in items {
        println!(
            "{:>8}  ₹{:<5} (${:<2})  {}",
            item.id(),
            item.price_local(),
            item.price_usd(),
            item.name()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mealcart_core::catalog::{CatalogError, CatalogGateway};

    /// Catalog that knows a single meal.
    struct OneMealCatalog;

    #[async_trait]
    impl CatalogGateway for OneMealCatalog {
        async fn search(&self, _query: &str) -> Result<Vec<CatalogItem>, CatalogError> {
            Ok(vec![meal()])
        }

        async fn lookup_by_id(&self, id: &str) -> Result<Option<CatalogItem>, CatalogError> {
            Ok((id == "52772").then(meal))
        }
    }

    fn meal() -> CatalogItem {
        CatalogItem::new("52772", "Teriyaki Chicken Casserole", "thumb.jpg")
    }

    fn checkout_request(phone: &str) -> CheckoutRequest {
        CheckoutRequest {
            item_id: "52772".to_string(),
            name: "Asha".to_string(),
            phone: phone.to_string(),
            address: "12 MG Road".to_string(),
            outcomes: vec![SimulatedOutcome::Success],
            payment_delay: Duration::ZERO,
        }
    }

    fn store() -> Arc<CatalogStore> {
        Arc::new(CatalogStore::new(Arc::new(OneMealCatalog)))
    }

    #[tokio::test]
    async fn test_checkout_completes() {
        let store = store();
        let request = checkout_request("98765 4321");
        checkout(store.clone(), PaymentConfig::default(), request)
            .await
            .unwrap();
        assert_eq!(store.all_items().len(), 1);
    }

    #[tokio::test]
    async fn test_checkout_refuses_over_long_phone() {
        let store = store();
        let request = checkout_request("919876543210");
        let err = checkout(store.clone(), PaymentConfig::default(), request)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("phone"), "unexpected error: {err}");
        // Never reached the payment step, so no post-payment refresh happened.
        assert!(store.all_items().is_empty());
    }
}
