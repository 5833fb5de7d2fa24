//! Full board/thread/comment lifecycle through the public facade

use crate::test_utils::*;
use pinboard::{Error, Pagination};

#[tokio::test]
async fn test_end_to_end_scenario() {
    let pin = create_test_pinboard();

    // A board, a thread in it, a comment under the thread
    let board = pin
        .boards()
        .create(Board::new("general", Some("talk about anything".into())))
        .await
        .unwrap();
    let thread = pin
        .threads()
        .create(board, Thread::new("welcome", "alice"))
        .await
        .unwrap();
    let comment = pin
        .comments()
        .create(thread, Comment::new("bob", Some("re: welcome".into()), "hi!"))
        .await
        .unwrap();

    // Everything readable, listings resolved through relations
    assert_eq!(pin.boards().get(board).await.unwrap().unwrap().name, "general");
    let threads = pin.threads().list_for_board(board).await.unwrap();
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].1.subject, "welcome");
    let comments = pin.comments().list_for_thread(thread).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].1.text, "hi!");

    // Two relation records: board->thread and thread->comment
    assert_eq!(pin.relations().count(), 2);
    assert!(pin.relations().find_dangling().await.unwrap().is_empty());

    // Updates replace in place
    pin.comments()
        .update(comment, Comment::new("bob", None, "hi, edited"))
        .await
        .unwrap();
    assert_eq!(
        pin.comments().get(comment).await.unwrap().unwrap().text,
        "hi, edited"
    );

    // Deleting the board takes the whole hierarchy with it
    assert!(pin.boards().delete(board).await.unwrap());
    assert!(pin.boards().get(board).await.unwrap().is_none());
    assert!(pin.threads().get(thread).await.unwrap().is_none());
    assert!(pin.comments().get(comment).await.unwrap().is_none());
    assert_eq!(pin.relations().count(), 0);

    pin.shutdown().await;
}

#[tokio::test]
async fn test_board_listing_pagination() {
    let pin = create_test_pinboard();
    for i in 0..5 {
        pin.boards()
            .create(Board::new(format!("b{i}"), None))
            .await
            .unwrap();
    }

    assert_eq!(pin.boards().list(Pagination::all()).await.unwrap().len(), 5);
    assert_eq!(pin.boards().list(Pagination::new(2, 0)).await.unwrap().len(), 2);
    assert_eq!(pin.boards().list(Pagination::new(2, 4)).await.unwrap().len(), 1);
    assert!(pin.boards().list(Pagination::new(2, 5)).await.unwrap().is_empty());

    pin.shutdown().await;
}

#[tokio::test]
async fn test_update_missing_entity_is_an_error() {
    let pin = create_test_pinboard();
    let ghost = pinboard::DocId::new();

    let err = pin
        .threads()
        .update(ghost, Thread::new("s", "a"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::EntityNotFound { collection, id }
        if collection == Collection::Threads && id == ghost));

    pin.shutdown().await;
}

#[tokio::test]
async fn test_listing_skips_documents_deleted_mid_read() {
    let pin = create_test_pinboard();
    let (board, thread_ids) = populate(&pin, 2, 0).await;

    // Remove one thread document directly; the relation record still exists
    // for a moment, and the listing must not surface a phantom entry.
    pin.store()
        .delete(Collection::Threads, thread_ids[0])
        .await
        .unwrap();

    let listed = pin.threads().list_for_board(board).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].0, thread_ids[1]);

    pin.shutdown().await;
}
