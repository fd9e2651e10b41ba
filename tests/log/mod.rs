//! Context propagation and entry merging, observed through a capture sink.

use task_rail::{alert, context, debug, error, info, pairs, perform, sequence, warning, Severity, Task};

use crate::support::capture;

#[tokio::test]
async fn nested_scopes_concatenate_namespaces_and_append_pairs() {
    let (sink, store) = capture();
    let task: Task<(), ()> = context(
        "api",
        pairs!["request_id" => "7"],
        context(
            "/v1",
            pairs!["user" => "42"],
            info("/ping", "hello", pairs!["local" => "x"]),
        ),
    );

    perform(vec![sink], task).await.unwrap();

    let entries = store.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].namespace, "api/v1/ping");
    let context: Vec<_> = entries[0].context.to_vec();
    assert_eq!(
        context,
        vec![
            ("request_id".to_string(), "7".to_string()),
            ("user".to_string(), "42".to_string()),
            ("local".to_string(), "x".to_string()),
        ]
    );
}

#[tokio::test]
async fn sibling_scopes_do_not_leak_into_each_other() {
    let (sink, store) = capture();
    let task: Task<(), ()> = context("a", pairs!["k" => "1"], info("x", "first", pairs![]))
        .and_then(|_| context("b", pairs!["k" => "2"], info("y", "second", pairs![])));

    perform(vec![sink], task).await.unwrap();

    let entries = store.lock().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].namespace, "ax");
    assert_eq!(entries[0].context.as_slice(), &[("k".to_string(), "1".to_string())]);
    assert_eq!(entries[1].namespace, "by");
    assert_eq!(entries[1].context.as_slice(), &[("k".to_string(), "2".to_string())]);
}

#[tokio::test]
async fn scope_extension_reaches_chained_and_zipped_subtasks() {
    let (sink, store) = capture();
    let inner: Task<(), ()> = info("/first", "one", pairs![])
        .and_then(|_| info("/second", "two", pairs![]));
    let task = context("job", pairs!["run" => "9"], inner);

    perform(vec![sink], task).await.unwrap();

    let entries = store.lock().unwrap();
    assert_eq!(entries[0].namespace, "job/first");
    assert_eq!(entries[1].namespace, "job/second");
    assert!(entries
        .iter()
        .all(|entry| entry.context.to_vec() == vec![("run".to_string(), "9".to_string())]));
}

#[tokio::test]
async fn each_surface_function_tags_its_severity() {
    let (sink, store) = capture();
    let task: Task<Vec<()>, ()> = sequence(vec![
        debug("n", "d", pairs![]),
        info("n", "i", pairs![]),
        warning("n", "w", pairs![]),
        error("n", "e", pairs![]),
        alert("n", "a", pairs![]),
    ]);

    perform(vec![sink], task).await.unwrap();

    let severities: Vec<Severity> = store.lock().unwrap().iter().map(|e| e.severity).collect();
    assert_eq!(
        severities,
        vec![
            Severity::Debug,
            Severity::Info,
            Severity::Warning,
            Severity::Error,
            Severity::Alert,
        ]
    );
}

#[tokio::test]
async fn log_time_is_captured_at_the_call_site() {
    let (sink, store) = capture();
    let before = chrono::Utc::now();
    let task: Task<(), ()> = info("n", "stamped", pairs![]);
    perform(vec![sink], task).await.unwrap();
    let after = chrono::Utc::now();

    let entries = store.lock().unwrap();
    assert!(entries[0].time >= before && entries[0].time <= after);
}
