//! Shared test sinks.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use task_rail::{Entry, SinkSettings, Task};

/// A custom sink appending every delivered entry to shared memory.
pub fn capture() -> (SinkSettings, Arc<Mutex<Vec<Entry>>>) {
    let store: Arc<Mutex<Vec<Entry>>> = Arc::new(Mutex::new(Vec::new()));
    let captured = store.clone();
    let sink = SinkSettings::custom(
        Task::succeed(captured),
        |store, entry| {
            store.lock().unwrap().push(entry);
            Task::succeed(())
        },
        |_store| Task::succeed(()),
    );
    (sink, store)
}

/// A custom sink that discards entries but counts close calls.
pub fn close_counting(closes: Arc<AtomicU32>) -> SinkSettings {
    SinkSettings::custom(
        Task::succeed(()),
        |_resource, _entry| Task::succeed(()),
        move |_resource| {
            closes.fetch_add(1, Ordering::SeqCst);
            Task::succeed(())
        },
    )
}
