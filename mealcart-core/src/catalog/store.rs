//! CatalogStore.
//!
//! The CatalogStore is responsible for:
//! - Keeping two independent, observable result sets: all items and search
//!   results
//! - Refreshing either set from the [`CatalogGateway`]
//! - Falling back to an empty set when the catalog fails
//! - Discarding completions that were overtaken by a newer request to the
//!   same set
//!
//! Every request takes a sequence number from its collection's monotonic
//! counter. A completion is applied only if its number is still the latest
//! one issued, so a slow response can never overwrite a newer one.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{CatalogGateway, CatalogItem};
use crate::observable::Observable;

/// Identifies one of the two result sets held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogCollection {
    /// Everything the home screen lists.
    AllItems,
    /// Results of the latest search.
    Search,
}

impl fmt::Display for CatalogCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogCollection::AllItems => write!(f, "all_items"),
            CatalogCollection::Search => write!(f, "search"),
        }
    }
}

/// What a refresh did to its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The fetch succeeded and the collection now holds this many items.
    Applied(usize),
    /// The fetch failed and the collection was emptied.
    FellBack,
    /// A newer request was issued meanwhile; this result was dropped.
    Superseded,
}

/// One observable result set plus its request sequence.
struct Collection {
    kind: CatalogCollection,
    items: Observable<Vec<CatalogItem>>,
    issued: AtomicU64,
}

impl Collection {
    fn new(kind: CatalogCollection) -> Self {
        Self {
            kind,
            items: Observable::new(Vec::new()),
            issued: AtomicU64::new(0),
        }
    }

    /// Take the next sequence number, superseding every earlier request.
    fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Store `items` if `seq` is still the latest request.
    fn apply(&self, seq: u64, items: Vec<CatalogItem>) -> bool {
        self.items
            .set_if(|_| (self.issued.load(Ordering::SeqCst) == seq).then_some(items))
    }
}

/// Holds the all-items and search result sets backed by one gateway.
///
/// The two sets are never merged and refreshing one never touches the
/// other. Catalog failures are swallowed: the affected set becomes empty
/// and a warning is logged.
pub struct CatalogStore {
    gateway: Arc<dyn CatalogGateway>,
    all_items: Collection,
    search_items: Collection,
}

impl CatalogStore {
    /// Create a new store. Both result sets start empty.
    pub fn new(gateway: Arc<dyn CatalogGateway>) -> Self {
        Self {
            gateway,
            all_items: Collection::new(CatalogCollection::AllItems),
            search_items: Collection::new(CatalogCollection::Search),
        }
    }

    /// Refresh the all-items set with the results of `query`.
    ///
    /// The home screen calls this with `""`.
    pub async fn refresh_all(&self, query: &str) -> RefreshOutcome {
        self.fetch_into(&self.all_items, query).await
    }

    /// Refresh the search set with the results of `query`.
    pub async fn search(&self, query: &str) -> RefreshOutcome {
        self.fetch_into(&self.search_items, query).await
    }

    /// Empty the search set.
    ///
    /// Any search still in flight is superseded, so it cannot repopulate the
    /// set after it was cleared.
    pub fn clear_search(&self) {
        let seq = self.search_items.issue();
        self.search_items.items.set(Vec::new());
        debug!(seq, "Cleared search results");
    }

    /// Look a single item up by identifier.
    ///
    /// Fails soft like the refreshes: any catalog error yields `None`.
    /// Neither result set is touched.
    pub async fn lookup(&self, id: &str) -> Option<CatalogItem> {
        match self.gateway.lookup_by_id(id).await {
            Ok(item) => item,
            Err(e) => {
                warn!(id, error = %e, "Catalog lookup failed");
                None
            }
        }
    }

    /// Snapshot of the all-items set.
    pub fn all_items(&self) -> Vec<CatalogItem> {
        self.all_items.items.get()
    }

    /// Snapshot of the search set.
    pub fn search_items(&self) -> Vec<CatalogItem> {
        self.search_items.items.get()
    }

    /// Subscribe to changes of the all-items set.
    pub fn subscribe_all(&self) -> watch::Receiver<Vec<CatalogItem>> {
        self.all_items.items.subscribe()
    }

    /// Subscribe to changes of the search set.
    pub fn subscribe_search(&self) -> watch::Receiver<Vec<CatalogItem>> {
        self.search_items.items.subscribe()
    }

    /// The observable backing the given set.
    pub fn collection(&self, which: CatalogCollection) -> &Observable<Vec<CatalogItem>> {
        match which {
            CatalogCollection::AllItems => &self.all_items.items,
            CatalogCollection::Search => &self.search_items.items,
        }
    }

    async fn fetch_into(&self, collection: &Collection, query: &str) -> RefreshOutcome {
        let seq = collection.issue();
        debug!(collection = %collection.kind, query, seq, "Fetching catalog");

        let (items, outcome) = match self.gateway.search(query).await {
            Ok(items) => {
                let count = items.len();
                (items, RefreshOutcome::Applied(count))
            }
            Err(e) => {
                warn!(
                    collection = %collection.kind,
                    query,
                    error = %e,
                    "Catalog fetch failed, falling back to empty result"
                );
                (Vec::new(), RefreshOutcome::FellBack)
            }
        };

        if !collection.apply(seq, items) {
            debug!(
                collection = %collection.kind,
                query,
                seq,
                "Discarding superseded catalog result"
            );
            return RefreshOutcome::Superseded;
        }

        if let RefreshOutcome::Applied(count) = outcome {
            info!(collection = %collection.kind, query, count, "Catalog refreshed");
        }
        outcome
    }
}
