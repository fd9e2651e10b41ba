//! Sink configuration and the open/write/close resource model.
//!
//! A sink is an open/write/close triple over an opaque resource. Four
//! variants are provided: [`none`](SinkSettings::none) discards everything,
//! [`terminal`](SinkSettings::terminal) renders coloured entries to stdout,
//! [`file`](SinkSettings::file) appends one serialised line per entry, and
//! [`custom`](SinkSettings::custom) delegates to user-supplied tasks with the
//! resource type erased at construction.
//!
//! Opening happens once at driver start (a custom sink's open failure aborts
//! the driver); writing happens on the sink's worker and failures there are
//! swallowed so a misbehaving sink cannot take the application down; closing
//! happens after the worker drains its queue.

pub(crate) mod custom;
pub(crate) mod file;
pub(crate) mod terminal;
pub(crate) mod worker;

use std::fmt;
use std::path::PathBuf;

use crate::entry::Entry;
use crate::task::Task;

/// Capacity of each sink's bounded queue. A log call finding the queue full
/// drops the entry rather than block the producing task.
pub const QUEUE_CAPACITY: usize = 4096;

/// A failure raised by a sink's open, write or close step.
///
/// Only open failures reach the caller (via
/// [`PerformError::Sink`](crate::PerformError::Sink)); write and close
/// failures are swallowed by the sink's worker and reported through
/// `tracing`.
#[derive(Debug)]
pub enum SinkError {
    /// An I/O failure in a built-in sink.
    Io(std::io::Error),
    /// A failure reported by a custom sink.
    Custom(String),
}

impl SinkError {
    /// Builds a custom-sink failure from any message.
    ///
    /// # Examples
    ///
    /// ```
    /// use task_rail::SinkError;
    ///
    /// let error = SinkError::custom("endpoint unreachable");
    /// assert_eq!(error.to_string(), "custom sink failed: endpoint unreachable");
    /// ```
    #[inline]
    pub fn custom<S: Into<String>>(message: S) -> Self {
        Self::Custom(message.into())
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(f, "sink i/o failed: {error}"),
            Self::Custom(message) => write!(f, "custom sink failed: {message}"),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            Self::Custom(_) => None,
        }
    }
}

impl From<std::io::Error> for SinkError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

/// Configuration for one sink, handed to [`perform`](crate::perform).
///
/// # Examples
///
/// ```
/// use task_rail::SinkSettings;
///
/// let sinks = vec![SinkSettings::terminal(), SinkSettings::file("/tmp/app.log")];
/// # drop(sinks);
/// ```
pub struct SinkSettings {
    kind: SinkKind,
}

enum SinkKind {
    None,
    Terminal,
    File(PathBuf),
    Custom(custom::OpenThunk),
}

impl SinkSettings {
    /// A sink that discards every entry. Useful for tests and for running
    /// tasks whose logging should be silenced.
    #[inline]
    pub fn none() -> Self {
        Self { kind: SinkKind::None }
    }

    /// A sink rendering entries to stdout with a severity-coloured header.
    #[inline]
    pub fn terminal() -> Self {
        Self { kind: SinkKind::Terminal }
    }

    /// A sink appending one serialised line per entry to `path`.
    ///
    /// The file is opened in append mode (created if missing) with
    /// line-buffered writes behind a mutex, and flushed on close. Entries
    /// within one driver run appear in the file totally ordered.
    #[inline]
    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        Self { kind: SinkKind::File(path.into()) }
    }

    /// A sink delegating open, write and close to user-supplied tasks.
    ///
    /// `open` runs once at driver start under an empty key and produces the
    /// sink's resource; its failure is fatal and aborts the driver. `write`
    /// runs per entry on the sink's worker; its failures (and panics) are
    /// swallowed. `close` runs after the worker drains.
    ///
    /// The resource type `R` is erased here, so heterogeneous sink lists
    /// stay simple.
    ///
    /// # Examples
    ///
    /// A capture sink collecting entries into shared memory:
    ///
    /// ```
    /// use std::sync::{Arc, Mutex};
    /// use task_rail::{Entry, SinkSettings, Task};
    ///
    /// let captured: Arc<Mutex<Vec<Entry>>> = Arc::new(Mutex::new(Vec::new()));
    /// let store = captured.clone();
    /// let sink = SinkSettings::custom(
    ///     Task::succeed(store),
    ///     |store, entry| {
    ///         store.lock().unwrap().push(entry);
    ///         Task::succeed(())
    ///     },
    ///     |_store| Task::succeed(()),
    /// );
    /// # drop(sink);
    /// ```
    pub fn custom<R, W, C>(open: Task<R, SinkError>, write: W, close: C) -> Self
    where
        R: Send + Sync + 'static,
        W: Fn(std::sync::Arc<R>, Entry) -> Task<(), SinkError> + Send + Sync + 'static,
        C: FnOnce(std::sync::Arc<R>) -> Task<(), SinkError> + Send + Sync + 'static,
    {
        Self { kind: SinkKind::Custom(custom::erase(open, write, close)) }
    }

    /// Opens the configured sink, producing its resource.
    pub(crate) async fn open(self) -> Result<SinkResource, SinkError> {
        match self.kind {
            SinkKind::None => Ok(SinkResource::None),
            SinkKind::Terminal => Ok(SinkResource::Terminal),
            SinkKind::File(path) => file::FileSink::open(&path).map(SinkResource::File),
            SinkKind::Custom(open) => custom::open(open).await.map(SinkResource::Custom),
        }
    }
}

/// An opened sink, owned by its worker until close.
pub(crate) enum SinkResource {
    None,
    Terminal,
    File(file::FileSink),
    Custom(custom::CustomResource),
}

impl SinkResource {
    /// Writes one entry. Failures are returned for the worker to report and
    /// discard; they never terminate the worker.
    pub(crate) async fn write(&mut self, entry: Entry) -> Result<(), SinkError> {
        match self {
            Self::None => Ok(()),
            Self::Terminal => terminal::write(&entry),
            Self::File(sink) => sink.write(&entry),
            Self::Custom(resource) => resource.write(entry).await,
        }
    }

    /// Releases the resource. Runs exactly once, after the worker has
    /// drained its queue.
    pub(crate) async fn close(self) -> Result<(), SinkError> {
        match self {
            Self::None | Self::Terminal => Ok(()),
            Self::File(sink) => sink.close(),
            Self::Custom(resource) => resource.close().await,
        }
    }
}
