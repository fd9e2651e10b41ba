//! The contextual task primitive and its combinators.
//!
//! A [`Task<T, E>`] is a deferred, fallible computation: given the ambient
//! [`Key`](crate::Key), it eventually yields `Ok(T)` or `Err(E)`. Tasks are
//! inert values until the driver ([`perform`](crate::perform)) or
//! [`exit`](crate::exit) invokes them, and the Key threads through every
//! combinator unchanged unless [`context`](crate::context()) explicitly
//! replaces it for an inner task.
//!
//! Composition mirrors `Result`: [`map`](Task::map) transforms successes,
//! [`and_then`](Task::and_then) chains dependent tasks,
//! [`map_error`](Task::map_error) / [`on_error`](Task::on_error) work the
//! error side, and the taps [`on_ok`](Task::on_ok) / [`on_err`](Task::on_err)
//! attach effects without disturbing the result. Multi-task zips live in
//! [`combine`](crate::task::combine).

pub mod combine;

use core::future::Future;
use core::pin::Pin;

use crate::key::Key;

/// Boxed future every task resolves through.
pub(crate) type TaskFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

type RunFn<T, E> = Box<dyn FnOnce(Key) -> TaskFuture<T, E> + Send>;

/// A deferred, fallible computation carrying an ambient [`Key`](crate::Key).
///
/// `T` is the success type, `E` the caller's domain-error type. Tasks own no
/// resources; sinks and queues live in the driver, and a task only sees them
/// through the Key it is invoked with.
///
/// # Examples
///
/// ```
/// use task_rail::{exit, Task};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let task: Task<i32, &str> = Task::succeed(20).map(|n| n * 2);
/// assert_eq!(exit(task).await, Ok(40));
/// # });
/// ```
#[must_use = "tasks do nothing until run by `perform` or `exit`"]
pub struct Task<T, E> {
    run: RunFn<T, E>,
}

impl<T, E> Task<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Wraps a key-consuming closure. Crate-internal: the Key must never be
    /// forgeable from outside a task invocation.
    pub(crate) fn from_fn<F, Fut>(run: F) -> Self
    where
        F: FnOnce(Key) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            run: Box::new(move |key| Box::pin(run(key))),
        }
    }

    /// Invokes the task with the given key.
    pub(crate) fn run(self, key: Key) -> TaskFuture<T, E> {
        (self.run)(key)
    }

    /// A task that always yields `Ok(value)`, ignoring the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use task_rail::{exit, Task};
    ///
    /// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
    /// let task: Task<&str, ()> = Task::succeed("ready");
    /// assert_eq!(exit(task).await, Ok("ready"));
    /// # });
    /// ```
    #[inline]
    pub fn succeed(value: T) -> Self {
        Self::from_fn(move |_key| async move { Ok(value) })
    }

    /// A task that always yields `Err(error)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use task_rail::{exit, Task};
    ///
    /// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
    /// let task: Task<(), &str> = Task::fail("denied");
    /// assert_eq!(exit(task).await, Err("denied"));
    /// # });
    /// ```
    #[inline]
    pub fn fail(error: E) -> Self {
        Self::from_fn(move |_key| async move { Err(error) })
    }

    /// Lifts a raw effectful computation into a task.
    ///
    /// This is the unique boundary where non-task effects are admitted. The
    /// future runs when the task does and the key is ignored, so anything
    /// entered this way neither reads nor disturbs the ambient scope.
    ///
    /// # Examples
    ///
    /// ```
    /// use task_rail::{exit, Task};
    ///
    /// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
    /// let task: Task<String, std::io::Error> = Task::enter(async {
    ///     Ok("loaded".to_string())
    /// });
    /// assert_eq!(exit(task).await.unwrap(), "loaded");
    /// # });
    /// ```
    #[inline]
    pub fn enter<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self::from_fn(move |_key| future)
    }

    /// Transforms the success value, propagating errors unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use task_rail::{exit, Task};
    ///
    /// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
    /// let task: Task<usize, ()> = Task::succeed("four").map(|s| s.len());
    /// assert_eq!(exit(task).await, Ok(4));
    /// # });
    /// ```
    #[inline]
    pub fn map<U, F>(self, f: F) -> Task<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        Task::from_fn(move |key| async move { self.run(key).await.map(f) })
    }

    /// Chains a dependent task onto the success value.
    ///
    /// The continuation runs with the same key as `self`, so both halves log
    /// into the same scope. Errors short-circuit: `f` is never called.
    ///
    /// # Examples
    ///
    /// ```
    /// use task_rail::{exit, Task};
    ///
    /// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
    /// let task: Task<i32, &str> =
    ///     Task::succeed(6).and_then(|n| if n > 5 { Task::succeed(n) } else { Task::fail("small") });
    /// assert_eq!(exit(task).await, Ok(6));
    /// # });
    /// ```
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Task<U, E>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Task<U, E> + Send + 'static,
    {
        Task::from_fn(move |key| async move {
            let value = self.run(key.clone()).await?;
            f(value).run(key).await
        })
    }

    /// Transforms the error value, leaving successes untouched.
    ///
    /// Equivalent to `on_error` with a recovery that immediately re-fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use task_rail::{exit, Task};
    ///
    /// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
    /// let task: Task<(), String> = Task::fail(404).map_error(|code| format!("status {code}"));
    /// assert_eq!(exit(task).await, Err("status 404".to_string()));
    /// # });
    /// ```
    #[inline]
    pub fn map_error<O, F>(self, f: F) -> Task<T, O>
    where
        O: Send + 'static,
        F: FnOnce(E) -> O + Send + 'static,
    {
        self.on_error(move |error| Task::fail(f(error)))
    }

    /// Recovers from an error with a fallback task, changing the error type.
    ///
    /// The recovery task runs with the same key as `self`. Successes pass
    /// through untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use task_rail::{exit, Task};
    ///
    /// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
    /// let task: Task<i32, ()> = Task::fail("gone").on_error(|_| Task::succeed(0));
    /// assert_eq!(exit(task).await, Ok(0));
    /// # });
    /// ```
    #[inline]
    pub fn on_error<O, F>(self, f: F) -> Task<T, O>
    where
        O: Send + 'static,
        F: FnOnce(E) -> Task<T, O> + Send + 'static,
    {
        Task::from_fn(move |key| async move {
            match self.run(key.clone()).await {
                Ok(value) => Ok(value),
                Err(error) => f(error).run(key).await,
            }
        })
    }

    /// Runs a tap on success, for its effects only.
    ///
    /// The tap receives a reference to the success value and runs under the
    /// same key, so its log entries share the task's scope. Its result is
    /// discarded, success or failure alike; the caller observes exactly the
    /// original task's outcome. Errors skip the tap.
    ///
    /// # Examples
    ///
    /// ```
    /// use task_rail::{exit, info, pairs, Task};
    ///
    /// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
    /// let task: Task<u64, &str> = Task::succeed(7)
    ///     .on_ok(|id| info("/job", "accepted", pairs!["id" => id.to_string()]));
    /// assert_eq!(exit(task).await, Ok(7));
    /// # });
    /// ```
    pub fn on_ok<F>(self, tap: F) -> Self
    where
        F: FnOnce(&T) -> Task<(), E> + Send + 'static,
    {
        Task::from_fn(move |key| async move {
            match self.run(key.clone()).await {
                Ok(value) => {
                    let _ = tap(&value).run(key).await;
                    Ok(value)
                }
                Err(error) => Err(error),
            }
        })
    }

    /// Runs a tap on error, for its effects only. Symmetric to
    /// [`on_ok`](Task::on_ok): the tap's own result is discarded and the
    /// original error is returned unchanged.
    pub fn on_err<F>(self, tap: F) -> Self
    where
        F: FnOnce(&E) -> Task<(), E> + Send + 'static,
    {
        Task::from_fn(move |key| async move {
            match self.run(key.clone()).await {
                Ok(value) => Ok(value),
                Err(error) => {
                    let _ = tap(&error).run(key).await;
                    Err(error)
                }
            }
        })
    }
}
