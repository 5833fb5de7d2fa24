//! Comment operations
//!
//! Comments are leaves: deleting one removes the specific
//! `threads -> comments` relation binding it to its thread, then the
//! document itself.

use std::sync::Arc;

use tracing::debug;

use pinboard_core::{Collection, Comment, DocId, Document, Endpoint, Error, Result};
use pinboard_store::MemoryStore;

use crate::relations::RelationService;

/// CRUD over comments with parent preconditions
#[derive(Clone)]
pub struct CommentService {
    store: Arc<MemoryStore>,
    relations: Arc<RelationService>,
}

impl CommentService {
    /// Create a comment service
    pub fn new(store: Arc<MemoryStore>, relations: Arc<RelationService>) -> Self {
        Self { store, relations }
    }

    /// Create a comment under a thread
    ///
    /// Fails with [`Error::ParentNotFound`] when the thread does not exist;
    /// in that case no comment document and no relation is created. On
    /// success a `threads -> comments` relation is recorded.
    pub async fn create(&self, thread_id: DocId, comment: Comment) -> Result<DocId> {
        if !self.store.contains(Collection::Threads, thread_id).await? {
            return Err(Error::ParentNotFound {
                collection: Collection::Threads,
                id: thread_id,
            });
        }

        let id = self
            .store
            .add(Collection::Comments, Document::Comment(comment))
            .await?;

        let attach = self
            .relations
            .add_relation(
                Endpoint::new(Collection::Threads, thread_id),
                Endpoint::new(Collection::Comments, id),
            )
            .await;

        match attach {
            Ok(_) => {
                debug!(comment = %id, thread = %thread_id, "comment created");
                Ok(id)
            }
            Err(err) => {
                self.store.delete(Collection::Comments, id).await?;
                Err(match err {
                    Error::EntityNotFound {
                        collection: Collection::Threads,
                        id,
                    } => Error::ParentNotFound {
                        collection: Collection::Threads,
                        id,
                    },
                    other => other,
                })
            }
        }
    }

    /// Fetch a comment by id
    pub async fn get(&self, id: DocId) -> Result<Option<Comment>> {
        Ok(self
            .store
            .get(Collection::Comments, id)
            .await?
            .and_then(|doc| doc.as_comment().cloned()))
    }

    /// All comments under a thread, resolved through the relation set
    pub async fn list_for_thread(&self, thread_id: DocId) -> Result<Vec<(DocId, Comment)>> {
        let parent = Endpoint::new(Collection::Threads, thread_id);
        let mut comments = Vec::new();

        for rel_id in self.relations.get_relations(Collection::Threads, thread_id).await? {
            let Some(rel) = self.relations.relation(rel_id).await? else {
                continue;
            };
            if rel.key() != parent || rel.value_collection != Collection::Comments {
                continue;
            }
            if let Some(comment) = self
                .store
                .get(Collection::Comments, rel.value_id)
                .await?
                .and_then(|doc| doc.as_comment().cloned())
            {
                comments.push((rel.value_id, comment));
            }
        }
        Ok(comments)
    }

    /// Replace an existing comment
    pub async fn update(&self, id: DocId, comment: Comment) -> Result<()> {
        if self
            .store
            .set(Collection::Comments, id, Document::Comment(comment))
            .await?
        {
            Ok(())
        } else {
            Err(Error::EntityNotFound {
                collection: Collection::Comments,
                id,
            })
        }
    }

    /// Delete a comment from a thread
    ///
    /// Removes the specific `threads -> comments` relation tying this
    /// comment to this thread, then the comment document. Returns `false`
    /// if the comment did not exist.
    pub async fn delete(&self, thread_id: DocId, id: DocId) -> Result<bool> {
        let existed = self.store.contains(Collection::Comments, id).await?;

        let parent = Endpoint::new(Collection::Threads, thread_id);
        let child = Endpoint::new(Collection::Comments, id);
        let mut matching = Vec::new();
        for rel_id in self.relations.get_relations(Collection::Comments, id).await? {
            if let Some(rel) = self.relations.relation(rel_id).await? {
                if rel.key() == parent && rel.value() == child {
                    matching.push(rel_id);
                }
            }
        }

        // The threads->comments cascade removes the document as well
        self.relations.delete_relations(&matching).await?;
        self.store.delete(Collection::Comments, id).await?;

        debug!(comment = %id, thread = %thread_id, existed, "comment deleted");
        Ok(existed)
    }
}
