//! In-process document store for the Pinboard engine
//!
//! Implements the store interface the relation-integrity engine consumes:
//! collection-oriented CRUD with store-assigned ids, plus a per-collection
//! change feed. Durability and replication are out of scope; the store
//! guarantees single-document atomicity only.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod feed;
mod store;

pub use feed::{ChangeEvent, ChangeKind};
pub use store::{MemoryStore, StoreConfig};
