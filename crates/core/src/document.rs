//! Domain documents and the unit of storage
//!
//! The store persists exactly one type, [`Document`]: a closed tagged union
//! of the known document kinds. There are no free-form records; a document
//! always belongs to exactly one [`Collection`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Collection, DocId, Endpoint};

/// A board: the top level of the hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Board name
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Board {
    /// Create a board with the current timestamp
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
            created_at: Utc::now(),
        }
    }
}

/// A thread, owned by exactly one board (relation-mediated, not a field)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    /// Thread subject line
    pub subject: String,
    /// Author identifier
    pub author: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Thread {
    /// Create a thread with the current timestamp
    pub fn new(subject: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            author: author.into(),
            created_at: Utc::now(),
        }
    }
}

/// A comment, owned by exactly one thread (relation-mediated, not a field)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Author identifier
    pub author: String,
    /// Optional comment title
    pub title: Option<String>,
    /// Comment body
    pub text: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a comment with the current timestamp
    pub fn new(author: impl Into<String>, title: Option<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            title,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// A directed edge: "key entity owns value entity"
///
/// Persisted flat in the `relations` collection as
/// `{key_collection, key_id, value_collection, value_id}`. The record's own
/// identity is the [`crate::types::RelationId`] the store assigned on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Collection containing the owning (parent) entity
    pub key_collection: Collection,
    /// Identifier of the owning entity
    pub key_id: DocId,
    /// Collection containing the owned (child) entity
    pub value_collection: Collection,
    /// Identifier of the owned entity
    pub value_id: DocId,
}

impl Relation {
    /// Create a relation from its two endpoints
    pub fn new(key: Endpoint, value: Endpoint) -> Self {
        Self {
            key_collection: key.collection,
            key_id: key.id,
            value_collection: value.collection,
            value_id: value.id,
        }
    }

    /// The owning (parent) endpoint
    pub fn key(&self) -> Endpoint {
        Endpoint::new(self.key_collection, self.key_id)
    }

    /// The owned (child) endpoint
    pub fn value(&self) -> Endpoint {
        Endpoint::new(self.value_collection, self.value_id)
    }

    /// Whether the given endpoint appears on either side of this relation
    pub fn touches(&self, endpoint: Endpoint) -> bool {
        self.key() == endpoint || self.value() == endpoint
    }
}

/// The unit of storage: a closed tagged union of the known document kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Document {
    /// A board document (`boards` collection)
    Board(Board),
    /// A thread document (`threads` collection)
    Thread(Thread),
    /// A comment document (`comments` collection)
    Comment(Comment),
    /// A relation record (`relations` collection)
    Relation(Relation),
}

impl Document {
    /// The collection this document belongs to
    pub fn collection(&self) -> Collection {
        match self {
            Document::Board(_) => Collection::Boards,
            Document::Thread(_) => Collection::Threads,
            Document::Comment(_) => Collection::Comments,
            Document::Relation(_) => Collection::Relations,
        }
    }

    /// Borrow as a board, if this is one
    pub fn as_board(&self) -> Option<&Board> {
        match self {
            Document::Board(b) => Some(b),
            _ => None,
        }
    }

    /// Borrow as a thread, if this is one
    pub fn as_thread(&self) -> Option<&Thread> {
        match self {
            Document::Thread(t) => Some(t),
            _ => None,
        }
    }

    /// Borrow as a comment, if this is one
    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Document::Comment(c) => Some(c),
            _ => None,
        }
    }

    /// Borrow as a relation record, if this is one
    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            Document::Relation(r) => Some(r),
            _ => None,
        }
    }
}

impl From<Board> for Document {
    fn from(b: Board) -> Self {
        Document::Board(b)
    }
}

impl From<Thread> for Document {
    fn from(t: Thread) -> Self {
        Document::Thread(t)
    }
}

impl From<Comment> for Document {
    fn from(c: Comment) -> Self {
        Document::Comment(c)
    }
}

impl From<Relation> for Document {
    fn from(r: Relation) -> Self {
        Document::Relation(r)
    }
}
