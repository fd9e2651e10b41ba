//! Hierarchical scoping of the ambient key.

use crate::key::{Key, Pair};
use crate::task::Task;

/// Runs `task` under a key extended with `namespace` and `pairs`.
///
/// For the dynamic extent of `task`, including everything it chains on with
/// [`and_then`](Task::and_then), the `map2`..`map6` zips, recoveries and
/// taps, the ambient key's namespace is `outer ++ namespace` and its context
/// is `outer ++ pairs`. Host, pid and the sink queues are untouched.
///
/// Namespaces concatenate without a separator; put the `/` (or whatever
/// convention the application uses) in the argument. Context extension is
/// append-only, so an inner scope can shadow a name for consumers that
/// deduplicate, but never remove or reorder what outer scopes recorded.
///
/// Control flow returning out of `task` restores the outer key by
/// construction: extension builds a new key for the inner invocation and
/// sibling scopes never see it.
///
/// # Examples
///
/// ```
/// use task_rail::{context, exit, info, pairs, Task};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let task: Task<(), ()> = context(
///     "api",
///     pairs!["request_id" => "7"],
///     info("/ping", "hello", pairs![]),
/// );
/// // The emitted entry carries namespace "api/ping" and the request_id pair.
/// assert_eq!(exit(task).await, Ok(()));
/// # });
/// ```
pub fn context<T, E, N, I>(namespace: N, pairs: I, task: Task<T, E>) -> Task<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
    N: Into<String>,
    I: IntoIterator<Item = Pair>,
{
    let namespace = namespace.into();
    let pairs: Vec<Pair> = pairs.into_iter().collect();
    Task::from_fn(move |key: Key| {
        let extended = key.extend(&namespace, pairs);
        task.run(extended)
    })
}
