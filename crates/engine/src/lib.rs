//! Relation-integrity engine: relation service, cascade-aware entity
//! services, and the reconciler
//!
//! The engine records parent/child associations between documents living in
//! different collections, enforces cascade-delete semantics across the
//! boards -> threads -> comments hierarchy, and repairs relations
//! asynchronously when entities disappear through a path that bypasses the
//! cascade logic.
//!
//! Nothing here is transactional across documents. Every delete primitive is
//! an idempotent no-op on missing ids, and the reconciler's sweep converges
//! the system back to "no dangling relations" after partial failures.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entities;
pub mod reconciler;
pub mod relations;

pub use entities::{BoardService, CommentService, ThreadService};
pub use reconciler::{Reconciler, ReconcilerHandle, ReconcilerMetrics};
pub use relations::{RelationService, RelationStore};
