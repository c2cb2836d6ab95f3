//! Catalog fetching and caching.
//!
//! - `CatalogItem`: an immutable, priced catalog entry
//! - `CatalogGateway`: the remote catalog contract and its HTTP implementation
//! - `CatalogStore`: two independently refreshed, observable result sets

pub mod gateway;
pub mod item;
pub mod store;

pub use gateway::{CatalogError, CatalogGateway, HttpCatalogGateway};
pub use item::CatalogItem;
pub use store::{CatalogCollection, CatalogStore, RefreshOutcome};
