//! Error types for the relation-integrity engine
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! Relation deletes deliberately do NOT surface not-found conditions. They
//! return booleans/counts instead, because idempotent cascade and reconciler
//! logic depend on "delete of something already gone" being harmless.

use thiserror::Error;

use crate::types::{Collection, DocId, Endpoint};

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the relation-integrity engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Creating a child whose declared parent does not exist
    #[error("parent not found: {collection}:{id}")]
    ParentNotFound {
        /// Collection the parent was expected in
        collection: Collection,
        /// Identifier that failed to resolve
        id: DocId,
    },

    /// get/update/delete against a missing target
    #[error("entity not found: {collection}:{id}")]
    EntityNotFound {
        /// Collection the entity was expected in
        collection: Collection,
        /// Identifier that failed to resolve
        id: DocId,
    },

    /// A relation with the same four-tuple already exists
    #[error("duplicate relation: {key} -> {value}")]
    DuplicateRelation {
        /// Owning endpoint of the rejected edge
        key: Endpoint,
        /// Owned endpoint of the rejected edge
        value: Endpoint,
    },

    /// A collection name outside the closed set
    #[error("unknown collection: {0:?}")]
    UnknownCollection(String),

    /// Store-level failure, propagated without retry
    #[error("store error: {0}")]
    Store(String),
}
