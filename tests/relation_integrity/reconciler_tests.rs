//! Reconciler convergence after deletions that bypass the services

use crate::test_utils::*;

#[tokio::test]
async fn test_out_of_band_thread_delete_converges() {
    let pin = create_test_pinboard();
    let (_, thread_ids) = populate(&pin, 1, 2).await;

    // Bypass every service: remove the thread document directly
    pin.store()
        .delete(Collection::Threads, thread_ids[0])
        .await
        .unwrap();

    // The reconciler picks up the removal event, deletes the relations
    // naming the thread, and the threads->comments cascade removes the
    // comment documents too.
    eventually("no dangling relations after thread removal", || async {
        pin.relations().find_dangling().await.unwrap().is_empty()
            && pin.relations().count() == 0
    })
    .await;
    eventually("comments cascaded", || async {
        pin.store().count(Collection::Comments) == 0
    })
    .await;

    pin.shutdown().await;
}

#[tokio::test]
async fn test_out_of_band_board_delete_converges() {
    let pin = create_test_pinboard();
    let (board, _) = populate(&pin, 3, 2).await;
    assert_eq!(pin.relations().count(), 9);

    pin.store().delete(Collection::Boards, board).await.unwrap();

    eventually("hierarchy fully reconciled", || async {
        pin.relations().count() == 0
            && pin.store().count(Collection::Threads) == 0
            && pin.store().count(Collection::Comments) == 0
    })
    .await;
    assert!(pin.relations().find_dangling().await.unwrap().is_empty());

    pin.shutdown().await;
}

#[tokio::test]
async fn test_out_of_band_comment_delete_removes_its_relation() {
    let pin = create_test_pinboard();
    let (_, thread_ids) = populate(&pin, 1, 1).await;

    let comments = pin.comments().list_for_thread(thread_ids[0]).await.unwrap();
    pin.store()
        .delete(Collection::Comments, comments[0].0)
        .await
        .unwrap();

    eventually("comment relation reconciled", || async {
        pin.relations().count() == 1
    })
    .await;
    // The thread and its board edge are untouched
    assert!(pin.threads().get(thread_ids[0]).await.unwrap().is_some());

    pin.shutdown().await;
}

#[tokio::test]
async fn test_reconciler_races_service_cascade_without_errors() {
    let pin = create_test_pinboard();
    let (board, _) = populate(&pin, 3, 3).await;

    // The service cascade emits a removal event per document it deletes;
    // the reconciler processes each one concurrently with the cascade still
    // running. Both paths are idempotent, so the end state is identical.
    assert!(pin.boards().delete(board).await.unwrap());

    eventually("all removal events processed", || async {
        // 1 board + 3 threads + 9 comments
        pin.reconciler_metrics().removals_seen() >= 13
    })
    .await;
    assert_eq!(pin.relations().count(), 0);
    assert!(pin.relations().find_dangling().await.unwrap().is_empty());

    pin.shutdown().await;
}

#[tokio::test]
async fn test_metrics_count_only_reconciler_deletions() {
    let pin = create_test_pinboard();
    let (_, thread_ids) = populate(&pin, 1, 0).await;
    let metrics = pin.reconciler_metrics();

    pin.store()
        .delete(Collection::Threads, thread_ids[0])
        .await
        .unwrap();

    eventually("removal processed", || async { metrics.removals_seen() >= 1 }).await;
    eventually("relation deleted by reconciler", || async {
        metrics.relations_deleted() >= 1
    })
    .await;

    pin.shutdown().await;
}
