//! The severity-tagged logging surface.
//!
//! Each entry point returns a `Task<(), E>` that, when run, stamps the
//! current time, merges its arguments with the ambient key (namespace and
//! context concatenation, see [`crate::context()`]), and hands the resulting
//! [`Entry`](crate::Entry) to every sink queue in the key.
//!
//! Logging is a side channel and must never stall or fail the program: the
//! fan-out uses `try_send` per queue, a full queue drops the entry and bumps
//! that sink's dropped counter, and the task always succeeds. Partial
//! delivery across sinks is acceptable and unreported.

use crate::entry::{Entry, Severity};
use crate::key::{Key, Pair};
use crate::task::Task;

fn log<E, N, M, I>(severity: Severity, namespace: N, message: M, pairs: I) -> Task<(), E>
where
    E: Send + 'static,
    N: Into<String>,
    M: Into<String>,
    I: IntoIterator<Item = Pair>,
{
    let namespace = namespace.into();
    let message = message.into();
    let pairs: Vec<Pair> = pairs.into_iter().collect();
    Task::from_fn(move |key: Key| async move {
        let entry = Entry::merge(severity, &key, &namespace, message, pairs);
        for queue in key.queues() {
            queue.push(entry.clone());
        }
        Ok(())
    })
}

/// Logs at [`Severity::Debug`].
///
/// # Examples
///
/// ```
/// use task_rail::{debug, exit, pairs, Task};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let task: Task<(), ()> = debug("/cache", "miss", pairs!["key" => "user:7"]);
/// assert_eq!(exit(task).await, Ok(()));
/// # });
/// ```
pub fn debug<E, N, M, I>(namespace: N, message: M, pairs: I) -> Task<(), E>
where
    E: Send + 'static,
    N: Into<String>,
    M: Into<String>,
    I: IntoIterator<Item = Pair>,
{
    log(Severity::Debug, namespace, message, pairs)
}

/// Logs at [`Severity::Info`].
pub fn info<E, N, M, I>(namespace: N, message: M, pairs: I) -> Task<(), E>
where
    E: Send + 'static,
    N: Into<String>,
    M: Into<String>,
    I: IntoIterator<Item = Pair>,
{
    log(Severity::Info, namespace, message, pairs)
}

/// Logs at [`Severity::Warning`].
pub fn warning<E, N, M, I>(namespace: N, message: M, pairs: I) -> Task<(), E>
where
    E: Send + 'static,
    N: Into<String>,
    M: Into<String>,
    I: IntoIterator<Item = Pair>,
{
    log(Severity::Warning, namespace, message, pairs)
}

/// Logs at [`Severity::Error`].
pub fn error<E, N, M, I>(namespace: N, message: M, pairs: I) -> Task<(), E>
where
    E: Send + 'static,
    N: Into<String>,
    M: Into<String>,
    I: IntoIterator<Item = Pair>,
{
    log(Severity::Error, namespace, message, pairs)
}

/// Logs at [`Severity::Alert`].
pub fn alert<E, N, M, I>(namespace: N, message: M, pairs: I) -> Task<(), E>
where
    E: Send + 'static,
    N: Into<String>,
    M: Into<String>,
    I: IntoIterator<Item = Pair>,
{
    log(Severity::Alert, namespace, message, pairs)
}
