//! Core identifier and addressing types
//!
//! This module defines the foundational types:
//! - DocId: store-assigned identifier for any document
//! - Collection: closed enum of the collections the engine knows about
//! - Endpoint: one side of a relation, `(collection, id)`
//! - Pagination: in-memory limit/offset settings for list operations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;

/// Store-assigned identifier for a document
///
/// A DocId is a wrapper around a UUID v4. The store assigns one on every
/// `add`; documents do not embed their own id, the store key is the
/// identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocId(Uuid);

impl DocId {
    /// Create a new random DocId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a DocId from a string representation
    ///
    /// Accepts standard UUID format (with or without hyphens).
    /// Returns None if the string is not a valid UUID.
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// Get the raw bytes of this DocId
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for DocId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a relation record
///
/// Relations live in the store's `relations` collection, so their ids are
/// ordinary store-assigned [`DocId`]s.
pub type RelationId = DocId;

/// The collections the engine operates on
///
/// This is a closed set: free-form collection names only enter through
/// [`FromStr`], which rejects anything unknown. Malformed edges are therefore
/// not representable inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Top-level boards
    Boards,
    /// Threads, each owned by one board
    Threads,
    /// Comments, each owned by one thread
    Comments,
    /// Relation records linking the above
    Relations,
}

impl Collection {
    /// The collection name as it appears in persisted records
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Boards => "boards",
            Collection::Threads => "threads",
            Collection::Comments => "comments",
            Collection::Relations => "relations",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boards" => Ok(Collection::Boards),
            "threads" => Ok(Collection::Threads),
            "comments" => Ok(Collection::Comments),
            "relations" => Ok(Collection::Relations),
            other => Err(Error::UnknownCollection(other.to_string())),
        }
    }
}

/// One side of a relation: a document addressed by collection and id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// Collection the document lives in
    pub collection: Collection,
    /// Identifier of the document
    pub id: DocId,
}

impl Endpoint {
    /// Create an endpoint
    pub fn new(collection: Collection, id: DocId) -> Self {
        Self { collection, id }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.collection, self.id)
    }
}

/// Limit/offset settings for list operations
///
/// Applied in memory after the collection scan. Parsing of transport-level
/// pagination parameters is the caller's concern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of items to return (None = no limit)
    pub limit: Option<usize>,
    /// Number of items to skip from the start (None = 0)
    pub offset: Option<usize>,
}

impl Pagination {
    /// Pagination that returns everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Pagination with a limit and an offset
    pub fn new(limit: usize, offset: usize) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    /// Apply these settings to an iterator of items
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset.unwrap_or(0))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}
