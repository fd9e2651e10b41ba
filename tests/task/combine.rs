//! Sequencing and the map2..map6 zips.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use task_rail::{exit, map2, map3, map6, sequence, Task};

/// A task that records whether it ever ran.
fn observed(flag: Arc<AtomicBool>, value: i32) -> Task<i32, &'static str> {
    Task::enter(async move {
        flag.store(true, Ordering::SeqCst);
        Ok(value)
    })
}

#[tokio::test]
async fn sequence_preserves_input_order() {
    let tasks: Vec<Task<i32, &'static str>> =
        vec![Task::succeed(1), Task::succeed(2), Task::succeed(3)];
    assert_eq!(exit(sequence(tasks)).await, Ok(vec![1, 2, 3]));
}

#[tokio::test]
async fn sequence_short_circuits_without_running_later_tasks() {
    let ran = Arc::new(AtomicBool::new(false));
    let tasks: Vec<Task<i32, &'static str>> = vec![
        Task::succeed(1),
        Task::fail("boom"),
        observed(ran.clone(), 3),
    ];

    assert_eq!(exit(sequence(tasks)).await, Err("boom"));
    assert!(!ran.load(Ordering::SeqCst));
}

#[tokio::test]
async fn sequence_of_nothing_is_empty() {
    let tasks: Vec<Task<i32, &'static str>> = Vec::new();
    assert_eq!(exit(sequence(tasks)).await, Ok(Vec::new()));
}

#[tokio::test]
async fn map2_combines_left_to_right() {
    let task = map2(|a, b| a - b, Task::<i32, &str>::succeed(10), Task::succeed(4));
    assert_eq!(exit(task).await, Ok(6));
}

#[tokio::test]
async fn map2_leftmost_failure_wins_and_skips_the_rest() {
    let ran = Arc::new(AtomicBool::new(false));
    let task = map2(
        |a, b| a + b,
        Task::<i32, &str>::fail("left"),
        observed(ran.clone(), 2),
    );

    assert_eq!(exit(task).await, Err("left"));
    assert!(!ran.load(Ordering::SeqCst));
}

#[tokio::test]
async fn map3_and_map6_collect_all_values() {
    let task = map3(
        |a, b, c| format!("{a}{b}{c}"),
        Task::<&str, ()>::succeed("a"),
        Task::succeed("b"),
        Task::succeed("c"),
    );
    assert_eq!(exit(task).await, Ok("abc".to_string()));

    let task = map6(
        |a, b, c, d, e, f| a + b + c + d + e + f,
        Task::<i32, ()>::succeed(1),
        Task::succeed(2),
        Task::succeed(3),
        Task::succeed(4),
        Task::succeed(5),
        Task::succeed(6),
    );
    assert_eq!(exit(task).await, Ok(21));
}
