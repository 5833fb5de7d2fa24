//! Per-collection change feed events
//!
//! Every mutation of a collection publishes a [`ChangeEvent`] on that
//! collection's broadcast channel. A subscription is infinite and not
//! restartable: a fresh subscriber only sees events from the moment it
//! attaches, and a slow subscriber that falls behind the channel capacity
//! observes a lag error rather than replay.

use pinboard_core::{Collection, DocId};

/// What happened to a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A document was created
    Added,
    /// An existing document was replaced
    Modified,
    /// A document was deleted
    Removed,
}

/// A low-level change notification for one document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    /// What happened
    pub kind: ChangeKind,
    /// Collection the document lives in
    pub collection: Collection,
    /// Identifier of the affected document
    pub id: DocId,
}

impl ChangeEvent {
    pub(crate) fn new(kind: ChangeKind, collection: Collection, id: DocId) -> Self {
        Self {
            kind,
            collection,
            id,
        }
    }
}
