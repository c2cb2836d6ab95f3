//! Catalog item domain type.

use mealcart_sdk::objects::MealRecord;

use crate::price::{derive_local_price, derive_usd_price};

/// One purchasable entry of the catalog.
///
/// Prices are always recomputed from the identifier and never taken from
/// the remote source. Fields are private so an item cannot change after it
/// is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogItem {
    id: String,
    name: String,
    thumbnail_url: String,
    price_usd: u32,
    price_local: u32,
}

impl CatalogItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        thumbnail_url: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            price_usd: derive_usd_price(&id),
            price_local: derive_local_price(&id),
            name: name.into(),
            thumbnail_url: thumbnail_url.into(),
            id,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn thumbnail_url(&self) -> &str {
        &self.thumbnail_url
    }

    pub fn price_usd(&self) -> u32 {
        self.price_usd
    }

    /// Price in the local currency, the amount charged at checkout.
    pub fn price_local(&self) -> u32 {
        self.price_local
    }
}

impl From<MealRecord> for CatalogItem {
    fn from(record: MealRecord) -> Self {
        Self::new(record.id, record.name, record.thumbnail)
    }
}
