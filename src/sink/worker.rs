//! Per-sink bounded queue and consumer loop.
//!
//! Every configured sink gets one worker: a spawned tokio task draining a
//! bounded mpsc queue in FIFO order and invoking the sink's write per entry.
//! Producers enqueue with `try_send` and drop on a full queue, so a slow sink
//! can lose entries but can never stall application logic. The worker
//! terminates on the [`SinkMessage::Done`] sentinel (or when every sender is
//! gone) and closes the resource itself, which pins close-after-drain without
//! any extra synchronisation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;

use crate::entry::Entry;
use crate::sink::{SinkResource, QUEUE_CAPACITY};

/// Message carried by a sink queue.
pub(crate) enum SinkMessage {
    /// A log entry to write.
    Entry(Entry),
    /// Shutdown sentinel: drain is complete once this is consumed.
    Done,
}

/// A producer-side handle to one sink's queue, stored in the ambient key.
#[derive(Clone)]
pub(crate) struct QueueHandle {
    tx: mpsc::Sender<SinkMessage>,
    dropped: Arc<AtomicU64>,
}

impl QueueHandle {
    /// Enqueues an entry without ever blocking the producer.
    ///
    /// A full queue drops the entry and bumps the sink's dropped counter; a
    /// closed queue (worker already gone) drops it silently.
    pub(crate) fn push(&self, entry: Entry) {
        match self.tx.try_send(SinkMessage::Entry(entry)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
            Err(TrySendError::Closed(_)) => {}
        }
    }
}

/// One spawned sink worker plus the driver-side pieces of its shutdown
/// protocol.
pub(crate) struct SinkWorker {
    tx: mpsc::Sender<SinkMessage>,
    dropped: Arc<AtomicU64>,
    worker: JoinHandle<()>,
}

impl SinkWorker {
    /// Allocates the queue and spawns the consumer loop over an opened
    /// resource.
    pub(crate) fn spawn(resource: SinkResource) -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        let worker = tokio::spawn(drain(resource, rx));
        Self {
            tx,
            dropped: Arc::new(AtomicU64::new(0)),
            worker,
        }
    }

    /// A producer handle for the ambient key.
    pub(crate) fn handle(&self) -> QueueHandle {
        QueueHandle {
            tx: self.tx.clone(),
            dropped: self.dropped.clone(),
        }
    }

    /// Shuts the worker down: enqueue the sentinel, wait for the queue to
    /// drain and the resource to close.
    ///
    /// The sentinel is sent with `send` rather than `try_send`: by the time
    /// quit runs the task has stopped producing, so waiting for a slot is
    /// bounded by the worker's own drain progress and the sentinel is
    /// guaranteed to land.
    pub(crate) async fn quit(self) {
        let _ = self.tx.send(SinkMessage::Done).await;
        if self.worker.await.is_err() {
            tracing::warn!("sink worker panicked; resource close may have been skipped");
        }
        let dropped = self.dropped.load(Ordering::Relaxed);
        if dropped > 0 {
            tracing::warn!(dropped, "sink queue overflowed during the run; entries were dropped");
        }
    }
}

/// The consumer loop: FIFO drain, write failures reported and discarded.
async fn drain(mut resource: SinkResource, mut rx: mpsc::Receiver<SinkMessage>) {
    while let Some(message) = rx.recv().await {
        match message {
            SinkMessage::Entry(entry) => {
                if let Err(error) = resource.write(entry).await {
                    tracing::warn!(%error, "sink write failed; entry discarded");
                }
            }
            SinkMessage::Done => break,
        }
    }
    if let Err(error) = resource.close().await {
        tracing::warn!(%error, "sink close failed");
    }
}
