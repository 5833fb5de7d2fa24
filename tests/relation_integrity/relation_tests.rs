//! Relation-record semantics observable through the facade

use crate::test_utils::*;
use pinboard::{DocId, Endpoint, Error};

#[tokio::test]
async fn test_relations_are_bidirectional() {
    let pin = create_test_pinboard();
    let (board, thread_ids) = populate(&pin, 1, 1).await;
    let thread = thread_ids[0];

    // The thread appears as value of one relation and key of another
    let via_thread = pin
        .relations()
        .get_relations(Collection::Threads, thread)
        .await
        .unwrap();
    assert_eq!(via_thread.len(), 2);

    let via_board = pin
        .relations()
        .get_relations(Collection::Boards, board)
        .await
        .unwrap();
    assert_eq!(via_board.len(), 1);

    // The same record is reachable from both of its endpoints
    assert!(via_thread.contains(&via_board[0]));

    pin.shutdown().await;
}

#[tokio::test]
async fn test_duplicate_relation_rejected() {
    let pin = create_test_pinboard();
    let (board, thread_ids) = populate(&pin, 1, 0).await;

    let key = Endpoint::new(Collection::Boards, board);
    let value = Endpoint::new(Collection::Threads, thread_ids[0]);

    // populate() already recorded this exact edge
    let err = pin.relations().add_relation(key, value).await.unwrap_err();
    assert!(matches!(err, Error::DuplicateRelation { .. }));
    assert_eq!(pin.relations().count(), 1);

    pin.shutdown().await;
}

#[tokio::test]
async fn test_parent_precondition_creates_nothing() {
    let pin = create_test_pinboard();
    let ghost = DocId::new();

    let err = pin
        .threads()
        .create(ghost, Thread::new("s", "a"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ParentNotFound { collection, id }
        if collection == Collection::Boards && id == ghost));

    let err = pin
        .comments()
        .create(ghost, Comment::new("a", None, "t"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ParentNotFound { collection, .. }
        if collection == Collection::Threads));

    assert_eq!(pin.store().count(Collection::Threads), 0);
    assert_eq!(pin.store().count(Collection::Comments), 0);
    assert_eq!(pin.relations().count(), 0);

    pin.shutdown().await;
}

#[tokio::test]
async fn test_deletes_are_idempotent() {
    let pin = create_test_pinboard();
    let (board, thread_ids) = populate(&pin, 1, 1).await;
    let thread = thread_ids[0];

    assert!(pin.threads().delete(thread).await.unwrap());
    assert!(!pin.threads().delete(thread).await.unwrap());

    assert!(pin.boards().delete(board).await.unwrap());
    assert!(!pin.boards().delete(board).await.unwrap());

    // Relation-level deletion reports false for unknown ids, never an error
    let removed = pin.relations().delete_relations(&[DocId::new()]).await.unwrap();
    assert_eq!(removed, 0);

    pin.shutdown().await;
}

#[tokio::test]
async fn test_relation_records_survive_document_updates() {
    let pin = create_test_pinboard();
    let (board, thread_ids) = populate(&pin, 1, 0).await;

    pin.threads()
        .update(thread_ids[0], Thread::new("renamed", "alice"))
        .await
        .unwrap();

    assert_eq!(pin.relations().count(), 1);
    let listed = pin.threads().list_for_board(board).await.unwrap();
    assert_eq!(listed[0].1.subject, "renamed");

    pin.shutdown().await;
}
