//! Contextual task composition with scoped, fan-out structured logging.
//!
//! `task-rail` is built around three pillars:
//! 1. **A fallible task primitive** – [`Task`] is a deferred
//!    computation that composes like `Result` ([`map`](Task::map),
//!    [`and_then`](Task::and_then), [`sequence`], `map2`..`map6`) and only
//!    runs when handed to the driver.
//! 2. **Dynamically scoped context** – every task runs under an ambient
//!    [`Key`] carrying the current namespace and structured context pairs;
//!    [`context`](context()) extends both for the dynamic extent of an inner
//!    task, with no thread-local state involved.
//! 3. **Non-blocking sink fan-out** – the log calls ([`debug`], [`info`],
//!    [`warning`], [`error`], [`alert`]) tag an [`Entry`] with the current
//!    scope and hand it to every configured sink through bounded queues;
//!    per-sink workers write in parallel, a full queue drops rather than
//!    stalls, and [`perform`] guarantees drain-and-close on every exit path.
//!
//! # Examples
//!
//! ## Scoped logging around fallible work
//!
//! ```
//! use task_rail::prelude::*;
//!
//! fn handle(request_id: u32) -> Task<&'static str, String> {
//!     context(
//!         "api",
//!         pairs!["request_id" => request_id.to_string()],
//!         info("/ping", "handling request", pairs![])
//!             .and_then(|_| Task::succeed("pong"))
//!             .on_ok(|reply| debug("/ping", format!("replying {reply}"), pairs![])),
//!     )
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let result = perform(vec![SinkSettings::none()], handle(7)).await;
//! assert_eq!(result.unwrap(), "pong");
//! # });
//! ```
//!
//! ## Multiple sinks
//!
//! ```no_run
//! use task_rail::prelude::*;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let task: Task<(), &str> = warning("startup", "running from a dirty tree", pairs![]);
//! let sinks = vec![SinkSettings::terminal(), SinkSettings::file("/var/log/app.log")];
//! perform(sinks, task).await.unwrap();
//! # });
//! ```
//!
//! Errors stay first-class and user-visible ([`Task::fail`],
//! [`map_error`](Task::map_error), [`on_error`](Task::on_error)); logging is
//! a side channel that never fails the program.

/// Hierarchical scoping of the ambient key
pub mod context;
/// Log record data model
pub mod entry;
/// The ambient key threaded through task invocations
pub mod key;
/// Severity-tagged logging surface
pub mod log;
/// Context-pair construction macros
pub mod macros;
/// Convenience re-exports
pub mod prelude;
/// The `perform`/`exit` drivers
pub mod runtime;
/// Sink configuration, resources and workers
pub mod sink;
/// The task primitive and its combinators
pub mod task;

pub use context::context;
pub use entry::{Entry, Severity};
pub use key::{ContextVec, Key, Pair};
pub use log::{alert, debug, error, info, warning};
pub use runtime::{exit, perform, PerformError};
pub use sink::{SinkError, SinkSettings, QUEUE_CAPACITY};
pub use task::combine::{map2, map3, map4, map5, map6, sequence};
pub use task::Task;
