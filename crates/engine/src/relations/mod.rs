//! Relation persistence and cascade-aware relation operations

mod service;
mod store;

pub use service::RelationService;
pub use store::RelationStore;
