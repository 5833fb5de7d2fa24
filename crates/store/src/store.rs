//! MemoryStore: the in-process document store collaborator
//!
//! This module implements the collection-oriented store the engine consumes:
//! - `BTreeMap<DocId, Document>` per collection behind `parking_lot::RwLock`
//! - store-assigned ids (UUID v4) on `add`
//! - a `tokio::sync::broadcast` change feed per collection
//!
//! # Design Notes
//!
//! - **Single-document atomicity only**: each operation touches one document
//!   under one lock; there are no multi-document transactions.
//! - **Async surface**: every operation is `async fn` because callers treat
//!   store calls as I/O suspension points. The in-memory implementation
//!   completes synchronously and never holds a lock across an await.
//! - **Full scans**: `scan` clones the collection contents, O(n). Lookups
//!   that need better than that keep their own secondary indexes.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::debug;

use pinboard_core::{Collection, DocId, Document, Error, Pagination, Result};

use crate::feed::{ChangeEvent, ChangeKind};

/// Tuning knobs for the store
#[derive(Debug, Clone, Copy)]
pub struct StoreConfig {
    /// Capacity of each collection's change-feed channel. Subscribers that
    /// fall more than this many events behind observe a lag error.
    pub feed_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { feed_capacity: 256 }
    }
}

/// One collection: its documents and its change feed
struct Shelf {
    docs: RwLock<BTreeMap<DocId, Document>>,
    feed: broadcast::Sender<ChangeEvent>,
}

impl Shelf {
    fn new(feed_capacity: usize) -> Self {
        let (feed, _) = broadcast::channel(feed_capacity);
        Self {
            docs: RwLock::new(BTreeMap::new()),
            feed,
        }
    }
}

/// In-memory document store with per-collection change feeds
///
/// Thread-safe through `parking_lot::RwLock` per collection; shared between
/// request-scoped tasks and the reconciler via `Arc`.
pub struct MemoryStore {
    boards: Shelf,
    threads: Shelf,
    comments: Shelf,
    relations: Shelf,
}

impl MemoryStore {
    /// Create an empty store with default configuration
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store with the given configuration
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            boards: Shelf::new(config.feed_capacity),
            threads: Shelf::new(config.feed_capacity),
            comments: Shelf::new(config.feed_capacity),
            relations: Shelf::new(config.feed_capacity),
        }
    }

    fn shelf(&self, collection: Collection) -> &Shelf {
        match collection {
            Collection::Boards => &self.boards,
            Collection::Threads => &self.threads,
            Collection::Comments => &self.comments,
            Collection::Relations => &self.relations,
        }
    }

    fn publish(&self, kind: ChangeKind, collection: Collection, id: DocId) {
        // Errors only mean "no subscribers right now"
        let _ = self
            .shelf(collection)
            .feed
            .send(ChangeEvent::new(kind, collection, id));
    }

    /// Persist a new document and return its store-assigned id
    ///
    /// The document's variant must match the target collection; a mismatch is
    /// a caller bug surfaced as a store error.
    pub async fn add(&self, collection: Collection, doc: Document) -> Result<DocId> {
        if doc.collection() != collection {
            return Err(Error::Store(format!(
                "document of kind {} cannot be added to {}",
                doc.collection(),
                collection
            )));
        }

        let id = DocId::new();
        {
            let mut docs = self.shelf(collection).docs.write();
            docs.insert(id, doc);
        }
        debug!(%collection, %id, "document added");
        self.publish(ChangeKind::Added, collection, id);
        Ok(id)
    }

    /// Fetch a document by id
    pub async fn get(&self, collection: Collection, id: DocId) -> Result<Option<Document>> {
        Ok(self.shelf(collection).docs.read().get(&id).cloned())
    }

    /// Whether a document exists
    pub async fn contains(&self, collection: Collection, id: DocId) -> Result<bool> {
        Ok(self.shelf(collection).docs.read().contains_key(&id))
    }

    /// Replace an existing document
    ///
    /// Returns `false` (and stores nothing) when the id does not exist; the
    /// store never creates documents with caller-chosen ids.
    pub async fn set(&self, collection: Collection, id: DocId, doc: Document) -> Result<bool> {
        if doc.collection() != collection {
            return Err(Error::Store(format!(
                "document of kind {} cannot be stored in {}",
                doc.collection(),
                collection
            )));
        }

        let replaced = {
            let mut docs = self.shelf(collection).docs.write();
            match docs.get_mut(&id) {
                Some(slot) => {
                    *slot = doc;
                    true
                }
                None => false,
            }
        };
        if replaced {
            debug!(%collection, %id, "document replaced");
            self.publish(ChangeKind::Modified, collection, id);
        }
        Ok(replaced)
    }

    /// Delete a document
    ///
    /// Idempotent: deleting a missing id is a no-op returning `false`.
    pub async fn delete(&self, collection: Collection, id: DocId) -> Result<bool> {
        let removed = {
            let mut docs = self.shelf(collection).docs.write();
            docs.remove(&id).is_some()
        };
        if removed {
            debug!(%collection, %id, "document removed");
            self.publish(ChangeKind::Removed, collection, id);
        }
        Ok(removed)
    }

    /// Produce every document in a collection, ordered by id
    pub async fn scan(&self, collection: Collection) -> Result<Vec<(DocId, Document)>> {
        Ok(self
            .shelf(collection)
            .docs
            .read()
            .iter()
            .map(|(id, doc)| (*id, doc.clone()))
            .collect())
    }

    /// A page of a collection, ordered by id
    pub async fn page(
        &self,
        collection: Collection,
        pagination: Pagination,
    ) -> Result<Vec<(DocId, Document)>> {
        let all = self.scan(collection).await?;
        Ok(pagination.apply(all))
    }

    /// Number of documents currently in a collection
    pub fn count(&self, collection: Collection) -> usize {
        self.shelf(collection).docs.read().len()
    }

    /// Subscribe to a collection's change feed
    ///
    /// The subscription sees only events published after this call.
    pub fn subscribe(&self, collection: Collection) -> broadcast::Receiver<ChangeEvent> {
        self.shelf(collection).feed.subscribe()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
