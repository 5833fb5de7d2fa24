//! Thread operations
//!
//! A thread's membership in a board is entirely relation-mediated: there is
//! no `board_id` field on the document. Listing a board's threads resolves
//! through the relation set, so a read racing a cascade may observe a
//! partially-cascaded state; missing documents are simply skipped.

use std::sync::Arc;

use tracing::debug;

use pinboard_core::{Collection, DocId, Document, Endpoint, Error, Result, Thread};
use pinboard_store::MemoryStore;

use crate::relations::RelationService;

/// CRUD over threads with parent preconditions and cascade-aware deletion
#[derive(Clone)]
pub struct ThreadService {
    store: Arc<MemoryStore>,
    relations: Arc<RelationService>,
}

impl ThreadService {
    /// Create a thread service
    pub fn new(store: Arc<MemoryStore>, relations: Arc<RelationService>) -> Self {
        Self { store, relations }
    }

    /// Create a thread under a board
    ///
    /// Fails with [`Error::ParentNotFound`] when the board does not exist;
    /// in that case no thread document and no relation is created. On
    /// success a `boards -> threads` relation is recorded.
    pub async fn create(&self, board_id: DocId, thread: Thread) -> Result<DocId> {
        if !self.store.contains(Collection::Boards, board_id).await? {
            return Err(Error::ParentNotFound {
                collection: Collection::Boards,
                id: board_id,
            });
        }

        let id = self
            .store
            .add(Collection::Threads, Document::Thread(thread))
            .await?;

        let attach = self
            .relations
            .add_relation(
                Endpoint::new(Collection::Boards, board_id),
                Endpoint::new(Collection::Threads, id),
            )
            .await;

        match attach {
            Ok(_) => {
                debug!(thread = %id, board = %board_id, "thread created");
                Ok(id)
            }
            Err(err) => {
                // The board vanished between the precondition check and the
                // attach; don't leave an orphaned thread document behind.
                self.store.delete(Collection::Threads, id).await?;
                Err(match err {
                    Error::EntityNotFound {
                        collection: Collection::Boards,
                        id,
                    } => Error::ParentNotFound {
                        collection: Collection::Boards,
                        id,
                    },
                    other => other,
                })
            }
        }
    }

    /// Fetch a thread by id
    pub async fn get(&self, id: DocId) -> Result<Option<Thread>> {
        Ok(self
            .store
            .get(Collection::Threads, id)
            .await?
            .and_then(|doc| doc.as_thread().cloned()))
    }

    /// All threads under a board, resolved through the relation set
    pub async fn list_for_board(&self, board_id: DocId) -> Result<Vec<(DocId, Thread)>> {
        let parent = Endpoint::new(Collection::Boards, board_id);
        let mut threads = Vec::new();

        for rel_id in self.relations.get_relations(Collection::Boards, board_id).await? {
            let Some(rel) = self.relations.relation(rel_id).await? else {
                continue; // record removed mid-iteration
            };
            if rel.key() != parent || rel.value_collection != Collection::Threads {
                continue;
            }
            if let Some(thread) = self
                .store
                .get(Collection::Threads, rel.value_id)
                .await?
                .and_then(|doc| doc.as_thread().cloned())
            {
                threads.push((rel.value_id, thread));
            }
        }
        Ok(threads)
    }

    /// Replace an existing thread
    pub async fn update(&self, id: DocId, thread: Thread) -> Result<()> {
        if self
            .store
            .set(Collection::Threads, id, Document::Thread(thread))
            .await?
        {
            Ok(())
        } else {
            Err(Error::EntityNotFound {
                collection: Collection::Threads,
                id,
            })
        }
    }

    /// Delete a thread and every relation naming it on either side
    ///
    /// The relations are deleted through the cascade path, so the thread's
    /// comments go with it. Returns `false` if the thread did not exist.
    pub async fn delete(&self, id: DocId) -> Result<bool> {
        let existed = self.store.contains(Collection::Threads, id).await?;

        let rels = self.relations.get_relations(Collection::Threads, id).await?;
        let removed = self.relations.delete_relations(&rels).await?;
        debug!(thread = %id, relations = removed, "thread cascade complete");

        // The board->thread edge in the cascade already deleted the document;
        // this covers threads that had no parent relation.
        self.store.delete(Collection::Threads, id).await?;
        Ok(existed)
    }
}
