//! Cascade completeness over wide hierarchies

use crate::test_utils::*;

#[tokio::test]
async fn test_board_cascade_is_complete() {
    let pin = create_test_pinboard();
    let (board, _) = populate(&pin, 4, 3).await;

    assert_eq!(pin.store().count(Collection::Threads), 4);
    assert_eq!(pin.store().count(Collection::Comments), 12);
    // 4 board->thread edges + 12 thread->comment edges
    assert_eq!(pin.relations().count(), 16);

    assert!(pin.boards().delete(board).await.unwrap());

    assert_eq!(pin.store().count(Collection::Boards), 0);
    assert_eq!(pin.store().count(Collection::Threads), 0);
    assert_eq!(pin.store().count(Collection::Comments), 0);
    assert_eq!(pin.relations().count(), 0);
    assert!(pin.relations().find_dangling().await.unwrap().is_empty());

    pin.shutdown().await;
}

#[tokio::test]
async fn test_thread_cascade_spares_siblings() {
    let pin = create_test_pinboard();
    let (board, thread_ids) = populate(&pin, 2, 2).await;

    assert!(pin.threads().delete(thread_ids[0]).await.unwrap());

    // The sibling thread and its comments are untouched
    assert_eq!(pin.store().count(Collection::Threads), 1);
    assert_eq!(pin.store().count(Collection::Comments), 2);
    // board->thread[1] plus thread[1]'s two comment edges
    assert_eq!(pin.relations().count(), 3);

    let listed = pin.threads().list_for_board(board).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].0, thread_ids[1]);

    pin.shutdown().await;
}

#[tokio::test]
async fn test_comment_delete_is_not_a_cascade() {
    let pin = create_test_pinboard();
    let (_, thread_ids) = populate(&pin, 1, 3).await;
    let thread = thread_ids[0];

    let comments = pin.comments().list_for_thread(thread).await.unwrap();
    assert!(pin.comments().delete(thread, comments[0].0).await.unwrap());

    assert_eq!(pin.store().count(Collection::Comments), 2);
    assert!(pin.threads().get(thread).await.unwrap().is_some());
    assert_eq!(pin.comments().list_for_thread(thread).await.unwrap().len(), 2);

    pin.shutdown().await;
}

#[tokio::test]
async fn test_cascade_after_partial_manual_cleanup() {
    let pin = create_test_pinboard();
    let (board, thread_ids) = populate(&pin, 2, 2).await;

    // A caller already removed one thread through the service path
    assert!(pin.threads().delete(thread_ids[0]).await.unwrap());

    // The board cascade must finish the rest without erroring on the
    // already-deleted subtree
    assert!(pin.boards().delete(board).await.unwrap());
    assert_eq!(pin.store().count(Collection::Threads), 0);
    assert_eq!(pin.store().count(Collection::Comments), 0);
    assert_eq!(pin.relations().count(), 0);

    pin.shutdown().await;
}
