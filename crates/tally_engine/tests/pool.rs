use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tally_engine::{Stage, StageFailure, WorkerPool};

#[tokio::test]
async fn outputs_keep_input_order() {
    let pool = WorkerPool::new(4);
    let items: Vec<u32> = (0..1000).collect();

    let out = pool
        .run(Stage::Mapping, items, None, |n| n * 2)
        .await
        .unwrap();

    assert_eq!(out, (0..1000).map(|n| n * 2).collect::<Vec<_>>());
}

#[tokio::test]
async fn empty_input_needs_no_workers() {
    let pool = WorkerPool::new(3);
    let out: Vec<u8> = pool
        .run(Stage::Reducing, Vec::<u8>::new(), Some(Duration::ZERO), |n| n)
        .await
        .unwrap();
    assert!(out.is_empty());
}

#[tokio::test]
async fn every_item_is_visited_once() {
    let visits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&visits);
    let pool = WorkerPool::new(7);

    let out = pool
        .run(Stage::Mapping, vec![(); 50], None, move |()| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .await
        .unwrap();

    assert_eq!(out.len(), 50);
    assert_eq!(visits.load(Ordering::SeqCst), 50);
}

#[tokio::test]
async fn worker_panic_fails_the_stage() {
    let pool = WorkerPool::new(2);
    let err = pool
        .run(Stage::Mapping, vec![1, 2, 3, 4], None, |n: i32| {
            if n == 3 {
                panic!("bad item {n}");
            }
            n
        })
        .await
        .unwrap_err();

    assert_eq!(err.stage, Stage::Mapping);
    assert_eq!(err.failure, StageFailure::WorkerPanicked("bad item 3".to_string()));
}

#[tokio::test]
async fn deadline_cancels_slow_stage() {
    let visits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&visits);
    let pool = WorkerPool::new(1);
    let limit = Duration::from_millis(20);

    let err = pool
        .run(Stage::Reducing, vec![(); 100], Some(limit), move |()| {
            counter.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(10));
        })
        .await
        .unwrap_err();

    assert_eq!(err.stage, Stage::Reducing);
    assert_eq!(err.failure, StageFailure::DeadlineExceeded(limit));

    // The worker notices cancellation between items and stops early.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(visits.load(Ordering::SeqCst) < 100);
}

#[tokio::test]
async fn zero_deadline_with_pending_work_is_exceeded() {
    let pool = WorkerPool::new(2);

    let err = pool
        .run(Stage::Mapping, (0..10).collect(), Some(Duration::ZERO), |n: u32| {
            std::thread::sleep(Duration::from_millis(20));
            n
        })
        .await
        .unwrap_err();

    assert_eq!(err.stage, Stage::Mapping);
    assert_eq!(err.failure, StageFailure::DeadlineExceeded(Duration::ZERO));
}

#[tokio::test]
async fn huge_worker_count_runs_few_items() {
    let pool = WorkerPool::new(usize::MAX);

    let out = pool
        .run(Stage::Mapping, vec![3, 1, 2], None, |n: u64| n + 1)
        .await
        .unwrap();

    assert_eq!(out, vec![4, 2, 3]);
}
