//! RelationStore: persistence of relation records
//!
//! Pure data access over the store's `relations` collection, no cascade
//! logic. Alongside the records themselves, the store maintains two
//! secondary indexes:
//! - `by_endpoint`: `(collection, id)` to the relation ids naming that
//!   endpoint on either side, making lookups O(degree) instead of a full
//!   collection scan
//! - `by_pair`: natural key `(key, value)` to relation id, enforcing that
//!   the same edge is never recorded twice
//!
//! Indexes are updated in step with each insert/delete. No lock is held
//! across a store call.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;

use pinboard_core::{Collection, Document, Endpoint, Error, Relation, RelationId, Result};
use pinboard_store::MemoryStore;

/// CRUD over relation records plus the endpoint/natural-key indexes
pub struct RelationStore {
    store: Arc<MemoryStore>,
    by_endpoint: DashMap<Endpoint, HashSet<RelationId>>,
    by_pair: DashMap<(Endpoint, Endpoint), RelationId>,
}

impl RelationStore {
    /// Create a relation store over the given document store
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            by_endpoint: DashMap::new(),
            by_pair: DashMap::new(),
        }
    }

    /// Persist a new relation record and index both endpoints
    ///
    /// Rejects a record whose natural key `(key, value)` is already present
    /// with [`Error::DuplicateRelation`].
    pub async fn insert(&self, relation: Relation) -> Result<RelationId> {
        let pair = (relation.key(), relation.value());
        if self.by_pair.contains_key(&pair) {
            return Err(Error::DuplicateRelation {
                key: pair.0,
                value: pair.1,
            });
        }

        let id = self
            .store
            .add(Collection::Relations, Document::Relation(relation))
            .await?;

        if let Some(winner) = self.by_pair.insert(pair, id) {
            // Lost a race against a concurrent insert of the same edge.
            // Restore the winner and drop our record.
            self.by_pair.insert(pair, winner);
            self.store.delete(Collection::Relations, id).await?;
            return Err(Error::DuplicateRelation {
                key: pair.0,
                value: pair.1,
            });
        }

        self.index_endpoint(pair.0, id);
        self.index_endpoint(pair.1, id);
        Ok(id)
    }

    /// Fetch a relation record by id
    pub async fn get(&self, id: RelationId) -> Result<Option<Relation>> {
        Ok(self
            .store
            .get(Collection::Relations, id)
            .await?
            .and_then(|doc| doc.as_relation().copied()))
    }

    /// Every relation currently stored
    ///
    /// Full collection scan; kept for audit and verification paths. Lookups
    /// on the hot path go through [`RelationStore::ids_for`].
    pub async fn scan_all(&self) -> Result<Vec<(RelationId, Relation)>> {
        Ok(self
            .store
            .scan(Collection::Relations)
            .await?
            .into_iter()
            .filter_map(|(id, doc)| doc.as_relation().copied().map(|rel| (id, rel)))
            .collect())
    }

    /// Delete a relation record by id
    ///
    /// Idempotent: a missing id is a no-op returning `false`, never an error.
    /// Multiple deletion paths (cascade and reconciler) may race to remove
    /// the same record.
    pub async fn delete_by_id(&self, id: RelationId) -> Result<bool> {
        let relation = self.get(id).await?;
        let removed = self.store.delete(Collection::Relations, id).await?;

        // Only the caller that actually removed the record unindexes it
        if removed {
            if let Some(rel) = relation {
                let pair = (rel.key(), rel.value());
                self.by_pair.remove_if(&pair, |_, current| *current == id);
                self.unindex_endpoint(pair.0, id);
                self.unindex_endpoint(pair.1, id);
            }
        }
        Ok(removed)
    }

    /// Relation ids naming the given endpoint on either side, sorted
    pub fn ids_for(&self, endpoint: Endpoint) -> Vec<RelationId> {
        let mut ids: Vec<RelationId> = self
            .by_endpoint
            .get(&endpoint)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    /// Number of relation records currently stored
    pub fn count(&self) -> usize {
        self.store.count(Collection::Relations)
    }

    fn index_endpoint(&self, endpoint: Endpoint, id: RelationId) {
        self.by_endpoint.entry(endpoint).or_default().insert(id);
    }

    fn unindex_endpoint(&self, endpoint: Endpoint, id: RelationId) {
        let now_empty = match self.by_endpoint.get_mut(&endpoint) {
            Some(mut set) => {
                set.remove(&id);
                set.is_empty()
            }
            None => false,
        };
        // Guard dropped above; re-check emptiness under the removal lock
        if now_empty {
            self.by_endpoint.remove_if(&endpoint, |_, set| set.is_empty());
        }
    }
}
