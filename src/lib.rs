//! Pinboard - relation-integrity engine for hierarchical documents
//!
//! Pinboard stores boards, threads, and comments as schema-less documents in
//! per-collection stores, records the parent/child structure as first-class
//! relation records, and keeps the two consistent: cascade deletes on the
//! request path, and an asynchronous reconciler that sweeps up dangling
//! relations whenever an entity is removed out of band.
//!
//! # Quick Start
//!
//! ```ignore
//! use pinboard::{Board, Comment, Pinboard, Thread};
//!
//! // Must run inside a tokio runtime
//! let pin = Pinboard::new();
//!
//! let board = pin.boards().create(Board::new("general", None)).await?;
//! let thread = pin.threads().create(board, Thread::new("hello", "alice")).await?;
//! pin.comments().create(thread, Comment::new("bob", None, "hi!")).await?;
//!
//! // Deleting the board cascades through threads and comments
//! pin.boards().delete(board).await?;
//!
//! pin.shutdown().await;
//! ```
//!
//! # Architecture
//!
//! The document store ([`MemoryStore`]) knows nothing about the hierarchy; it
//! stores opaque documents and publishes a change feed per collection. All
//! structure lives in the relation layer ([`RelationService`]) and the entity
//! services built on top of it. The [`Reconciler`] subscribes to the change
//! feeds and re-runs the cascade policy for any removal it observes, so the
//! system converges to "no dangling relations" even when deletions bypass
//! the services entirely.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::sync::Arc;

pub use pinboard_core::{
    Board, Collection, Comment, DocId, Document, Endpoint, Error, Pagination, Relation,
    RelationId, Result, Thread,
};
pub use pinboard_engine::{
    BoardService, CommentService, Reconciler, ReconcilerHandle, ReconcilerMetrics,
    RelationService, ThreadService,
};
pub use pinboard_store::{ChangeEvent, ChangeKind, MemoryStore, StoreConfig};

/// High-level handle bundling the store, the services, and a running
/// reconciler
///
/// Construction spawns the reconciler's watcher tasks, so a [`Pinboard`] must
/// be created inside a tokio runtime. Call [`Pinboard::shutdown`] to stop the
/// reconciler and wait for its tasks; dropping the handle stops them without
/// waiting.
pub struct Pinboard {
    store: Arc<MemoryStore>,
    relations: Arc<RelationService>,
    boards: BoardService,
    threads: ThreadService,
    comments: CommentService,
    reconciler: ReconcilerHandle,
}

impl Pinboard {
    /// Create an in-memory pinboard with default store settings
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an in-memory pinboard with explicit store settings
    pub fn with_config(config: StoreConfig) -> Self {
        let store = Arc::new(MemoryStore::with_config(config));
        let relations = Arc::new(RelationService::new(Arc::clone(&store)));
        let reconciler = Reconciler::spawn(Arc::clone(&store), Arc::clone(&relations));

        Self {
            boards: BoardService::new(Arc::clone(&store), Arc::clone(&relations)),
            threads: ThreadService::new(Arc::clone(&store), Arc::clone(&relations)),
            comments: CommentService::new(Arc::clone(&store), Arc::clone(&relations)),
            store,
            relations,
            reconciler,
        }
    }

    /// The underlying document store
    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    /// The relation layer
    pub fn relations(&self) -> &Arc<RelationService> {
        &self.relations
    }

    /// Board operations
    pub fn boards(&self) -> &BoardService {
        &self.boards
    }

    /// Thread operations
    pub fn threads(&self) -> &ThreadService {
        &self.threads
    }

    /// Comment operations
    pub fn comments(&self) -> &CommentService {
        &self.comments
    }

    /// Counters from the running reconciler
    pub fn reconciler_metrics(&self) -> Arc<ReconcilerMetrics> {
        self.reconciler.metrics()
    }

    /// Stop the reconciler and wait for its tasks to exit
    pub async fn shutdown(self) {
        self.reconciler.shutdown().await;
    }
}

impl Default for Pinboard {
    fn default() -> Self {
        Self::new()
    }
}
