//! Resource-type erasure for user-supplied sinks.
//!
//! [`SinkSettings::custom`](crate::SinkSettings::custom) accepts an open
//! task producing an arbitrary resource `R` plus write/close callbacks over
//! it. `R` is erased here: opening yields a [`CustomResource`] whose write
//! and close thunks already hold the resource behind an [`Arc`], so the
//! worker never needs to know its type.
//!
//! All three user tasks execute through [`exit`](crate::exit), a bare
//! driver invocation with an empty key and no queues, so a sink cannot log
//! into the very queues it is draining. Write tasks additionally run on a
//! spawned tokio task: a panicking user sink is reported and discarded
//! instead of killing the worker.

use std::sync::Arc;

use crate::entry::Entry;
use crate::sink::SinkError;
use crate::task::Task;

/// Deferred custom-sink open, resource type already erased.
pub(crate) type OpenThunk = Box<dyn FnOnce() -> Task<CustomResource, SinkError> + Send>;

/// An opened custom sink: write and close thunks sharing the user resource.
pub(crate) struct CustomResource {
    write: Arc<dyn Fn(Entry) -> Task<(), SinkError> + Send + Sync>,
    close: Option<Box<dyn FnOnce() -> Task<(), SinkError> + Send + Sync>>,
}

/// Erases the user's resource type behind write/close thunks.
pub(crate) fn erase<R, W, C>(open: Task<R, SinkError>, write: W, close: C) -> OpenThunk
where
    R: Send + Sync + 'static,
    W: Fn(Arc<R>, Entry) -> Task<(), SinkError> + Send + Sync + 'static,
    C: FnOnce(Arc<R>) -> Task<(), SinkError> + Send + Sync + 'static,
{
    Box::new(move || {
        open.map(move |resource| {
            let resource = Arc::new(resource);
            let write_resource = Arc::clone(&resource);
            CustomResource {
                write: Arc::new(move |entry| write(Arc::clone(&write_resource), entry)),
                close: Some(Box::new(move || close(resource))),
            }
        })
    })
}

/// Runs the user's open task. Failure here is fatal for the driver; a panic
/// is converted into a typed failure so the driver can still unwind the
/// sinks it already started.
pub(crate) async fn open(thunk: OpenThunk) -> Result<CustomResource, SinkError> {
    match tokio::spawn(crate::runtime::exit(thunk())).await {
        Ok(result) => result,
        Err(_) => Err(SinkError::custom("sink open panicked")),
    }
}

impl CustomResource {
    /// Runs the user's write task for one entry, swallowing panics.
    pub(crate) async fn write(&self, entry: Entry) -> Result<(), SinkError> {
        let write = Arc::clone(&self.write);
        let task = write(entry);
        match tokio::spawn(crate::runtime::exit(task)).await {
            Ok(result) => result,
            Err(_) => Err(SinkError::custom("sink write panicked")),
        }
    }

    /// Runs the user's close task once.
    pub(crate) async fn close(mut self) -> Result<(), SinkError> {
        match self.close.take() {
            Some(close) => match tokio::spawn(crate::runtime::exit(close())).await {
                Ok(result) => result,
                Err(_) => Err(SinkError::custom("sink close panicked")),
            },
            None => Ok(()),
        }
    }
}
