//! Reconciler: change-feed driven garbage collection of dangling relations
//!
//! Any deletion path that bypasses the cascade logic (a direct store delete,
//! a crash mid-cascade, external mutation) leaves relation records behind.
//! The reconciler holds one long-lived subscription per watched collection
//! and treats every `Removed` event as a trigger: look up every relation
//! naming the removed entity on either side, and delete them through the
//! same cascade policy the request path uses.
//!
//! Handlers are idempotent. An event for an entity a cascade already handled
//! finds no relations and is a no-op, so duplicate delivery and races with
//! request-scoped cascades converge instead of erroring.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use pinboard_core::{Collection, DocId};
use pinboard_store::{ChangeEvent, ChangeKind, MemoryStore};

use crate::relations::RelationService;

/// Collections whose removal events trigger reconciliation
const WATCHED: [Collection; 3] = [
    Collection::Boards,
    Collection::Threads,
    Collection::Comments,
];

/// Counters exposed by the reconciler
///
/// `removals_seen` is incremented only after the corresponding cleanup has
/// run, so waiting for it to reach a known value is a valid barrier in tests.
#[derive(Debug, Default)]
pub struct ReconcilerMetrics {
    removals_seen: AtomicU64,
    relations_deleted: AtomicU64,
}

impl ReconcilerMetrics {
    /// Number of removal events fully processed so far
    pub fn removals_seen(&self) -> u64 {
        self.removals_seen.load(Ordering::Acquire)
    }

    /// Number of relation records the reconciler has deleted
    pub fn relations_deleted(&self) -> u64 {
        self.relations_deleted.load(Ordering::Acquire)
    }

    fn record(&self, deleted: usize) {
        self.relations_deleted
            .fetch_add(deleted as u64, Ordering::Release);
        self.removals_seen.fetch_add(1, Ordering::Release);
    }
}

/// Handle owning the reconciler's background tasks
///
/// One task per watched collection, each owning its own subscription.
/// Dropping the handle stops the tasks; [`ReconcilerHandle::shutdown`] stops
/// them and waits for them to finish.
pub struct ReconcilerHandle {
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
    metrics: Arc<ReconcilerMetrics>,
}

impl ReconcilerHandle {
    /// Shared view of the reconciler's counters
    pub fn metrics(&self) -> Arc<ReconcilerMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Signal every watcher task to stop and wait for them to exit
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        for task in self.tasks.drain(..) {
            let _ = task.await;
        }
    }
}

/// Change-feed driven garbage collector for dangling relations
pub struct Reconciler;

impl Reconciler {
    /// Spawn one watcher task per watched collection
    ///
    /// Must be called within a tokio runtime. The tasks run until the handle
    /// is shut down (or dropped) or the store's feeds close.
    pub fn spawn(store: Arc<MemoryStore>, relations: Arc<RelationService>) -> ReconcilerHandle {
        let metrics = Arc::new(ReconcilerMetrics::default());
        let (shutdown, _) = watch::channel(false);

        let tasks = WATCHED
            .iter()
            .map(|&collection| {
                // Subscribe before spawning so no removal event published
                // after `spawn` returns can be missed by the watcher task.
                let feed = store.subscribe(collection);
                tokio::spawn(watch_collection(
                    collection,
                    feed,
                    Arc::clone(&relations),
                    Arc::clone(&metrics),
                    shutdown.subscribe(),
                ))
            })
            .collect();

        ReconcilerHandle {
            shutdown,
            tasks,
            metrics,
        }
    }
}

async fn watch_collection(
    collection: Collection,
    mut feed: broadcast::Receiver<ChangeEvent>,
    relations: Arc<RelationService>,
    metrics: Arc<ReconcilerMetrics>,
    mut shutdown: watch::Receiver<bool>,
) {
    debug!(%collection, "reconciler watching");

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            event = feed.recv() => match event {
                Ok(ev) if ev.kind == ChangeKind::Removed => {
                    reconcile_removal(collection, ev.id, &relations, &metrics).await;
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    // The feed is not restartable; relations tied to the
                    // skipped removals stay dangling until another event for
                    // the same entity arrives.
                    warn!(%collection, skipped, "change feed lagged, removal events missed");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    debug!(%collection, "reconciler stopped");
}

async fn reconcile_removal(
    collection: Collection,
    id: DocId,
    relations: &RelationService,
    metrics: &ReconcilerMetrics,
) {
    let deleted = match relations.get_relations(collection, id).await {
        Ok(rel_ids) => match relations.delete_relations(&rel_ids).await {
            Ok(deleted) => deleted,
            Err(err) => {
                // Never fatal: a failed sweep leaves a recoverable state
                warn!(%collection, %id, %err, "reconcile cascade failed");
                0
            }
        },
        Err(err) => {
            warn!(%collection, %id, %err, "relation lookup failed during reconcile");
            0
        }
    };

    if deleted > 0 {
        debug!(%collection, %id, deleted, "reconciled dangling relations");
    }
    metrics.record(deleted);
}
