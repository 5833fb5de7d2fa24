//! Core types for the Pinboard relation-integrity engine
//!
//! This crate defines the foundational types used throughout the system:
//! - DocId / RelationId: store-assigned identifiers
//! - Collection: closed enum of the known collections
//! - Endpoint: one side of a relation
//! - Board / Thread / Comment / Relation: the domain documents
//! - Document: the tagged union the store persists
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use document::{Board, Comment, Document, Relation, Thread};
pub use error::{Error, Result};
pub use types::{Collection, DocId, Endpoint, Pagination, RelationId};
