//! The top-level driver owning sink lifecycles.
//!
//! [`perform`] is the only way to run a task against real sinks. It follows
//! a strict bracket: open every sink and spawn its worker, build the initial
//! key, run the task, and then, regardless of how the task ended, signal
//! every worker and wait for each queue to drain and each resource to close,
//! in sink declaration order. [`exit`] is the degenerate driver used at
//! interop boundaries: same key construction, no sinks.

use std::fmt;
use std::sync::OnceLock;

use crate::key::Key;
use crate::sink::worker::SinkWorker;
use crate::sink::{SinkError, SinkSettings};
use crate::task::Task;

/// How a [`perform`] invocation can fail.
#[derive(Debug)]
pub enum PerformError<E> {
    /// The task itself failed with a domain error.
    Task(E),
    /// A sink failed to open; the task never ran.
    Sink(SinkError),
    /// The task body panicked. Shutdown still ran; the payload message is
    /// surfaced here.
    Panic(String),
}

impl<E> PerformError<E> {
    /// The domain error, if that is what happened.
    pub fn into_task_error(self) -> Option<E> {
        match self {
            Self::Task(error) => Some(error),
            Self::Sink(_) | Self::Panic(_) => None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for PerformError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task(error) => write!(f, "task failed: {error}"),
            Self::Sink(error) => write!(f, "sink startup failed: {error}"),
            Self::Panic(message) => write!(f, "task panicked: {message}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for PerformError<E> {}

/// Host name captured once per process.
fn host() -> String {
    static HOST: OnceLock<String> = OnceLock::new();
    HOST.get_or_init(|| gethostname::gethostname().to_string_lossy().into_owned())
        .clone()
}

/// Runs a task with the configured sinks, guaranteeing sink shutdown on
/// every exit path.
///
/// 1. Each sink is opened in declaration order and its worker spawned as
///    soon as it opens. An open failure (possible for `file` and `custom`
///    sinks) aborts startup: already-started workers are shut down, in
///    order, and [`PerformError::Sink`] is returned.
/// 2. The initial key is built from the host name, the process id and one
///    queue handle per sink, and the task runs under it on a spawned tokio
///    task, so a panicking task body is contained.
/// 3. Whatever the outcome, every worker is then signalled with the shutdown
///    sentinel and awaited: its queue drains FIFO and its resource closes
///    exactly once. Close order is sink declaration order.
///
/// `perform` does not return until every non-dropped entry has been written
/// and every sink has closed.
///
/// Dropping the future returned by `perform` mid-run detaches the task
/// instead of unwinding the bracket: the task keeps running on its spawned
/// tokio task, and once it finishes (releasing the last queue senders) each
/// worker drains what it has and closes. Drive `perform` to completion when
/// orderly shutdown matters.
///
/// # Examples
///
/// ```
/// use task_rail::{info, pairs, perform, SinkSettings, Task};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let task: Task<i32, &str> =
///     info("boot", "starting", pairs![]).and_then(|_| Task::succeed(42));
/// let result = perform(vec![SinkSettings::none()], task).await;
/// assert_eq!(result.unwrap(), 42);
/// # });
/// ```
pub async fn perform<T, E>(
    sinks: Vec<SinkSettings>,
    task: Task<T, E>,
) -> Result<T, PerformError<E>>
where
    T: Send + 'static,
    E: Send + 'static,
{
    let mut workers: Vec<SinkWorker> = Vec::with_capacity(sinks.len());
    for settings in sinks {
        match settings.open().await {
            Ok(resource) => workers.push(SinkWorker::spawn(resource)),
            Err(error) => {
                for worker in workers {
                    worker.quit().await;
                }
                return Err(PerformError::Sink(error));
            }
        }
    }

    let queues = workers.iter().map(SinkWorker::handle).collect();
    let key = Key::root(host(), std::process::id(), queues);
    let outcome = tokio::spawn(task.run(key)).await;

    for worker in workers {
        worker.quit().await;
    }

    match outcome {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(PerformError::Task(error)),
        Err(join_error) => Err(PerformError::Panic(panic_message(join_error))),
    }
}

/// Runs a task with no sinks at all: the key carries host and pid but an
/// empty queue list, so log calls succeed and discard.
///
/// This is the bridge back to plain effectful code, and what the runtime
/// itself uses to execute custom-sink tasks. Unlike [`perform`] it does not
/// contain panics; a panicking task propagates to the caller.
///
/// # Examples
///
/// ```
/// use task_rail::{exit, Task};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let task: Task<i32, &str> = Task::succeed(1).map(|n| n + 1);
/// assert_eq!(exit(task).await, Ok(2));
/// # });
/// ```
pub async fn exit<T, E>(task: Task<T, E>) -> Result<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    let key = Key::root(host(), std::process::id(), Vec::new());
    task.run(key).await
}

fn panic_message(error: tokio::task::JoinError) -> String {
    match error.try_into_panic() {
        Ok(payload) => {
            if let Some(message) = payload.downcast_ref::<&'static str>() {
                (*message).to_string()
            } else if let Some(message) = payload.downcast_ref::<String>() {
                message.clone()
            } else {
                "non-string panic payload".to_string()
            }
        }
        Err(error) => error.to_string(),
    }
}
