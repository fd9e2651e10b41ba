//! Taps are transparent: `on_ok`/`on_err` never change the tapped result.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use task_rail::{exit, info, pairs, perform, Task};

use crate::support::capture;

#[tokio::test]
async fn on_ok_runs_tap_and_returns_original_value() {
    let (sink, store) = capture();
    let task: Task<u64, &str> = Task::succeed(7)
        .on_ok(|id| info("/job", "accepted", pairs!["id" => id.to_string()]));

    let result = perform(vec![sink], task).await;
    assert_eq!(result.unwrap(), 7);

    let entries = store.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "accepted");
    assert_eq!(entries[0].context[0], ("id".to_string(), "7".to_string()));
}

#[tokio::test]
async fn on_ok_skips_tap_on_error() {
    let tapped = Arc::new(AtomicBool::new(false));
    let flag = tapped.clone();
    let task: Task<u64, &'static str> = Task::fail("denied").on_ok(move |_| {
        Task::enter(async move {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        })
    });

    assert_eq!(exit(task).await, Err("denied"));
    assert!(!tapped.load(Ordering::SeqCst));
}

#[tokio::test]
async fn tap_failures_are_invisible_to_the_caller() {
    let task: Task<i32, &'static str> = Task::succeed(3).on_ok(|_| Task::fail("tap exploded"));
    assert_eq!(exit(task).await, Ok(3));

    let task: Task<i32, &'static str> = Task::fail("real").on_err(|_| Task::fail("tap exploded"));
    assert_eq!(exit(task).await, Err("real"));
}

#[tokio::test]
async fn on_err_logs_and_preserves_the_error() {
    let (sink, store) = capture();
    let task: Task<(), String> = Task::fail("timeout".to_string())
        .on_err(|error| info("/retry", format!("attempt failed: {error}"), pairs![]));

    let result = perform(vec![sink], task).await;
    assert_eq!(result.unwrap_err().into_task_error().unwrap(), "timeout");

    let entries = store.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, "attempt failed: timeout");
}
