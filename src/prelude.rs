//! Convenience re-exports for common usage patterns.
//!
//! Import everything with:
//!
//! ```
//! use task_rail::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **The task surface**: [`Task`], [`context`], [`sequence`], the
//!   `map2`..`map6` zips
//! - **Logging**: [`debug`], [`info`], [`warning`], [`error`], [`alert`],
//!   the [`pairs!`] macro
//! - **Running**: [`perform`], [`exit`], [`SinkSettings`], [`SinkError`],
//!   [`PerformError`]
//!
//! # Examples
//!
//! ```
//! use task_rail::prelude::*;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let task: Task<u32, &str> = context(
//!     "worker",
//!     pairs!["shard" => "3"],
//!     info("/claim", "claimed batch", pairs![]).and_then(|_| Task::succeed(17)),
//! );
//! let result = perform(vec![SinkSettings::none()], task).await;
//! assert_eq!(result.unwrap(), 17);
//! # });
//! ```

pub use crate::pairs;

pub use crate::context::context;
pub use crate::entry::{Entry, Severity};
pub use crate::key::{Key, Pair};
pub use crate::log::{alert, debug, error, info, warning};
pub use crate::runtime::{exit, perform, PerformError};
pub use crate::sink::{SinkError, SinkSettings};
pub use crate::task::combine::{map2, map3, map4, map5, map6, sequence};
pub use crate::task::Task;
