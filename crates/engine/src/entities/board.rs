//! Board operations
//!
//! Boards are the hierarchy root. Deleting a board cascades through its
//! relations to every thread underneath it and, transitively, every comment.

use std::sync::Arc;

use tracing::debug;

use pinboard_core::{Board, Collection, DocId, Document, Error, Pagination, Result};
use pinboard_store::MemoryStore;

use crate::relations::RelationService;

/// CRUD over boards with cascade-aware deletion
#[derive(Clone)]
pub struct BoardService {
    store: Arc<MemoryStore>,
    relations: Arc<RelationService>,
}

impl BoardService {
    /// Create a board service
    pub fn new(store: Arc<MemoryStore>, relations: Arc<RelationService>) -> Self {
        Self { store, relations }
    }

    /// Create a board and return its store-assigned id
    pub async fn create(&self, board: Board) -> Result<DocId> {
        let id = self.store.add(Collection::Boards, Document::Board(board)).await?;
        debug!(board = %id, "board created");
        Ok(id)
    }

    /// Fetch a board by id
    pub async fn get(&self, id: DocId) -> Result<Option<Board>> {
        Ok(self
            .store
            .get(Collection::Boards, id)
            .await?
            .and_then(|doc| doc.as_board().cloned()))
    }

    /// A page of all boards, ordered by id
    pub async fn list(&self, pagination: Pagination) -> Result<Vec<(DocId, Board)>> {
        Ok(self
            .store
            .page(Collection::Boards, pagination)
            .await?
            .into_iter()
            .filter_map(|(id, doc)| doc.as_board().cloned().map(|b| (id, b)))
            .collect())
    }

    /// Replace an existing board
    pub async fn update(&self, id: DocId, board: Board) -> Result<()> {
        if self.store.set(Collection::Boards, id, Document::Board(board)).await? {
            Ok(())
        } else {
            Err(Error::EntityNotFound {
                collection: Collection::Boards,
                id,
            })
        }
    }

    /// Delete a board, cascading to its threads and their comments
    ///
    /// Returns `false` if the board did not exist.
    pub async fn delete(&self, id: DocId) -> Result<bool> {
        if !self.store.contains(Collection::Boards, id).await? {
            return Ok(false);
        }

        let rels = self.relations.get_relations(Collection::Boards, id).await?;
        let removed = self.relations.delete_relations(&rels).await?;
        debug!(board = %id, relations = removed, "board cascade complete");

        self.store.delete(Collection::Boards, id).await
    }
}
