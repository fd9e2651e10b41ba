//! Observable monad-law checks for task composition.
//!
//! The laws are checked on results: both sides of each equation run to
//! completion and must agree, for successes and for failures.

use task_rail::{exit, Task};

fn double(n: i32) -> Task<i32, &'static str> {
    Task::succeed(n * 2)
}

fn reject(_: i32) -> Task<i32, &'static str> {
    Task::fail("rejected")
}

#[tokio::test]
async fn left_identity_succeed_then_bind_equals_apply() {
    let bound = Task::succeed(21).and_then(double);
    assert_eq!(exit(bound).await, exit(double(21)).await);

    let bound = Task::succeed(21).and_then(reject);
    assert_eq!(exit(bound).await, exit(reject(21)).await);
}

#[tokio::test]
async fn right_identity_bind_with_succeed_is_noop() {
    let task: Task<i32, &'static str> = Task::succeed(7).and_then(Task::succeed);
    assert_eq!(exit(task).await, Ok(7));

    let task: Task<i32, &'static str> = Task::fail("boom").and_then(Task::succeed);
    assert_eq!(exit(task).await, Err("boom"));
}

#[tokio::test]
async fn associativity_of_and_then() {
    let nested: Task<i32, &'static str> = Task::succeed(3).and_then(double).and_then(double);
    let flat: Task<i32, &'static str> =
        Task::succeed(3).and_then(|n| double(n).and_then(double));

    assert_eq!(exit(nested).await, exit(flat).await);

    let nested: Task<i32, &'static str> = Task::succeed(3).and_then(reject).and_then(double);
    let flat: Task<i32, &'static str> =
        Task::succeed(3).and_then(|n| reject(n).and_then(double));

    assert_eq!(exit(nested).await, exit(flat).await);
}

#[tokio::test]
async fn map_transforms_success_only() {
    let task: Task<usize, &'static str> = Task::succeed("four").map(str::len);
    assert_eq!(exit(task).await, Ok(4));

    let task: Task<usize, &'static str> = Task::fail("gone").map(|_: &str| 0);
    assert_eq!(exit(task).await, Err("gone"));
}

#[tokio::test]
async fn map_error_and_on_error_work_the_error_side() {
    let task: Task<(), String> = Task::fail(404).map_error(|code| format!("status {code}"));
    assert_eq!(exit(task).await, Err("status 404".to_string()));

    let recovered: Task<i32, ()> = Task::fail("gone").on_error(|_| Task::succeed(0));
    assert_eq!(exit(recovered).await, Ok(0));

    let untouched: Task<i32, ()> = Task::succeed(5).on_error(|_: ()| Task::succeed(0));
    assert_eq!(exit(untouched).await, Ok(5));
}

#[tokio::test]
async fn enter_lifts_raw_effects() {
    let task: Task<String, std::io::Error> =
        Task::enter(async { Ok("from the outside".to_string()) });
    assert_eq!(exit(task).await.unwrap(), "from the outside");
}
