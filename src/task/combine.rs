//! Combining independent tasks.
//!
//! The `map2`..`map6` arities are one macro expansion over the same shape: run
//! each argument task left to right with the shared key, short-circuit on the
//! first error, then apply the combining function to the collected values.
//! [`sequence`] is the homogeneous variant, folding a vector of tasks into a
//! task of a vector.

use crate::key::Key;
use crate::task::Task;

/// Runs tasks in input order, collecting their results.
///
/// Short-circuits on the first error: later tasks are never invoked. On
/// success the output vector preserves input order.
///
/// # Examples
///
/// ```
/// use task_rail::{exit, sequence, Task};
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let tasks: Vec<Task<i32, &str>> = vec![Task::succeed(1), Task::succeed(2)];
/// assert_eq!(exit(sequence(tasks)).await, Ok(vec![1, 2]));
///
/// let tasks: Vec<Task<i32, &str>> =
///     vec![Task::succeed(1), Task::fail("boom"), Task::succeed(3)];
/// assert_eq!(exit(sequence(tasks)).await, Err("boom"));
/// # });
/// ```
pub fn sequence<T, E>(tasks: Vec<Task<T, E>>) -> Task<Vec<T>, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    Task::from_fn(move |key: Key| async move {
        let mut values = Vec::with_capacity(tasks.len());
        for task in tasks {
            values.push(task.run(key.clone()).await?);
        }
        Ok(values)
    })
}

macro_rules! map_arity {
    ($(#[$doc:meta])* $name:ident => $($task:ident: $ty:ident),+) => {
        $(#[$doc])*
        pub fn $name<F, Out, E, $($ty),+>(f: F, $($task: Task<$ty, E>),+) -> Task<Out, E>
        where
            F: FnOnce($($ty),+) -> Out + Send + 'static,
            Out: Send + 'static,
            E: Send + 'static,
            $($ty: Send + 'static,)+
        {
            Task::from_fn(move |key: Key| async move {
                $(let $task = $task.run(key.clone()).await?;)+
                Ok(f($($task),+))
            })
        }
    };
}

map_arity! {
    /// Combines two independent tasks with `f`.
    ///
    /// The tasks run left to right under the shared key; if the first fails
    /// its error is the result and the second never runs.
    ///
    /// # Examples
    ///
    /// ```
    /// use task_rail::{exit, map2, Task};
    ///
    /// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
    /// let task: task_rail::Task<i32, &str> =
    ///     map2(|a, b| a + b, Task::succeed(1), Task::succeed(2));
    /// assert_eq!(exit(task).await, Ok(3));
    /// # });
    /// ```
    map2 => a: A, b: B
}

map_arity! {
    /// Combines three independent tasks with `f`; see [`map2`].
    map3 => a: A, b: B, c: C
}

map_arity! {
    /// Combines four independent tasks with `f`; see [`map2`].
    map4 => a: A, b: B, c: C, d: D
}

map_arity! {
    /// Combines five independent tasks with `f`; see [`map2`].
    map5 => a: A, b: B, c: C, d: D, e2: E2
}

map_arity! {
    /// Combines six independent tasks with `f`; see [`map2`].
    map6 => a: A, b: B, c: C, d: D, e2: E2, g: G
}
