//! RelationService: lookup, creation, and cascade-aware deletion
//!
//! The service answers "what is this entity connected to" and enforces the
//! domain cascade policy when relations are deleted:
//! - `boards -> threads`: the referenced thread is deleted outright and the
//!   cascade recurses into the thread's own relations (its comments)
//! - `threads -> comments`: the referenced comment is deleted outright
//! - any other pair: only the relation record is removed
//!
//! Cascade deletion is NOT transactional. A crash mid-sequence may leave
//! children deleted with sibling records remaining; the reconciler restores
//! the no-dangling invariant from the removal events.

use std::sync::Arc;

use tracing::debug;

use pinboard_core::{Collection, DocId, Endpoint, Error, Relation, RelationId, Result};
use pinboard_store::MemoryStore;

use crate::relations::store::RelationStore;

/// Relation lookup, creation, and cascade-aware deletion
pub struct RelationService {
    store: Arc<MemoryStore>,
    relations: RelationStore,
}

impl RelationService {
    /// Create a relation service over the given document store
    pub fn new(store: Arc<MemoryStore>) -> Self {
        let relations = RelationStore::new(Arc::clone(&store));
        Self { store, relations }
    }

    /// Record that `key` owns `value`
    ///
    /// Both endpoints must reference existing documents
    /// ([`Error::EntityNotFound`] otherwise), and the edge must not already
    /// exist ([`Error::DuplicateRelation`]).
    pub async fn add_relation(&self, key: Endpoint, value: Endpoint) -> Result<RelationId> {
        self.ensure_exists(key).await?;
        self.ensure_exists(value).await?;

        let id = self.relations.insert(Relation::new(key, value)).await?;
        debug!(%key, %value, relation = %id, "relation recorded");
        Ok(id)
    }

    /// Every relation where `(collection, id)` appears as either endpoint
    ///
    /// Both "this entity's children" and "this entity's parent" are returned
    /// together; callers disambiguate by inspecting each record's
    /// key/value collections via [`RelationService::relation`].
    pub async fn get_relations(&self, collection: Collection, id: DocId) -> Result<Vec<RelationId>> {
        Ok(self.relations.ids_for(Endpoint::new(collection, id)))
    }

    /// Fetch a relation record by id
    pub async fn relation(&self, id: RelationId) -> Result<Option<Relation>> {
        self.relations.get(id).await
    }

    /// Delete a relation, applying the domain cascade policy
    ///
    /// Returns `false` if the relation did not exist (idempotent no-op).
    /// Child documents are deleted before the record itself so that a crash
    /// mid-cascade leaves removal events behind for the reconciler to finish
    /// the job.
    pub async fn delete_relation(&self, id: RelationId) -> Result<bool> {
        let Some(rel) = self.relations.get(id).await? else {
            return Ok(false);
        };

        match (rel.key_collection, rel.value_collection) {
            (Collection::Boards, Collection::Threads) => {
                self.store.delete(Collection::Threads, rel.value_id).await?;
                // The thread's own relations, minus the edge being deleted
                let downstream: Vec<RelationId> = self
                    .relations
                    .ids_for(rel.value())
                    .into_iter()
                    .filter(|rid| *rid != id)
                    .collect();
                let removed = self.delete_relations(&downstream).await?;
                debug!(
                    thread = %rel.value_id,
                    downstream = removed,
                    "cascaded board->thread deletion"
                );
            }
            (Collection::Threads, Collection::Comments) => {
                self.store.delete(Collection::Comments, rel.value_id).await?;
            }
            _ => {}
        }

        self.relations.delete_by_id(id).await
    }

    /// Apply [`RelationService::delete_relation`] to each id in sequence
    ///
    /// Continues past individual no-ops; returns the number of records
    /// actually removed. Ids that were already deleted (by a concurrent
    /// cascade or the reconciler) never raise an error.
    pub async fn delete_relations(&self, ids: &[RelationId]) -> Result<usize> {
        let mut removed = 0;
        for id in ids {
            // Boxed: delete_relation recurses back through this fn
            if Box::pin(self.delete_relation(*id)).await? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Every relation currently stored, with its id
    pub async fn scan_all(&self) -> Result<Vec<(RelationId, Relation)>> {
        self.relations.scan_all().await
    }

    /// Relations whose key or value endpoint no longer exists
    ///
    /// Audit helper over the full scan. A non-empty result is a transient
    /// state the reconciler is expected to clear.
    pub async fn find_dangling(&self) -> Result<Vec<(RelationId, Relation)>> {
        let mut dangling = Vec::new();
        for (id, rel) in self.relations.scan_all().await? {
            let key_alive = self.store.contains(rel.key_collection, rel.key_id).await?;
            let value_alive = self
                .store
                .contains(rel.value_collection, rel.value_id)
                .await?;
            if !key_alive || !value_alive {
                dangling.push((id, rel));
            }
        }
        Ok(dangling)
    }

    /// Number of relation records currently stored
    pub fn count(&self) -> usize {
        self.relations.count()
    }

    async fn ensure_exists(&self, endpoint: Endpoint) -> Result<()> {
        if self.store.contains(endpoint.collection, endpoint.id).await? {
            Ok(())
        } else {
            Err(Error::EntityNotFound {
                collection: endpoint.collection,
                id: endpoint.id,
            })
        }
    }
}
