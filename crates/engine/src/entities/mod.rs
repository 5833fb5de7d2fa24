//! Cascade-aware entity services over boards, threads, and comments
//!
//! Each service exposes standard CRUD over its own collection plus the
//! hierarchy-aware behavior: parent existence preconditions on create,
//! relation recording on attach, and cascade-aware deletion.

mod board;
mod comment;
mod thread;

pub use board::BoardService;
pub use comment::CommentService;
pub use thread::ThreadService;
