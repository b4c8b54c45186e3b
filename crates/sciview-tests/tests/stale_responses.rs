//! Overlapping invocation behavior.
//!
//! A refresh issued while a prior invocation is still running must not crash
//! anything, and the superseded invocation must be killed rather than left
//! to overwrite fresher data.

#![cfg(unix)]

use std::path::Path;
use std::time::{Duration, Instant};

use sciview_reader::{CancelToken, Invoker, ReaderError};
use sciview_result::{FileFormat, ReaderPayload};
use sciview_tests::StubReaders;

#[test]
fn superseded_invocation_is_killed_and_newer_one_wins() {
    let stubs = StubReaders::new();
    // The slow stub would eventually answer; the fast one answers immediately.
    stubs.install(FileFormat::Npy, "sleep 30");
    let slow_invoker = Invoker::with_config(stubs.config());
    let slow_cancel = CancelToken::new();

    let slow_handle = {
        let cancel = slow_cancel.clone();
        std::thread::spawn(move || {
            slow_invoker.run_cancellable(FileFormat::Npy, Path::new("weights.npy"), &cancel)
        })
    };

    // A refresh supersedes the outstanding load: cancel it, then run anew.
    slow_cancel.cancel();

    stubs.install(
        FileFormat::Npy,
        r#"echo '{"shape": [1], "dtype": "int8", "size": 1, "preview": [7]}'"#,
    );
    let fast_invoker = Invoker::with_config(stubs.config());
    let fresh = fast_invoker.invoke(FileFormat::Npy, Path::new("weights.npy"));

    let start = Instant::now();
    let stale = slow_handle.join().expect("invocation thread must not panic");
    assert!(
        start.elapsed() < Duration::from_secs(10),
        "cancelled invocation should return promptly"
    );
    assert!(matches!(stale, Err(ReaderError::Cancelled)));

    let ReaderPayload::Array(array) = fresh else {
        panic!("expected the fresh payload to win");
    };
    assert_eq!(array.preview, vec![serde_json::json!(7)]);
}

#[test]
fn concurrent_invocations_do_not_interfere() {
    let stubs = StubReaders::new();
    stubs.install(
        FileFormat::Npy,
        r#"printf '{"error": "got %s"}' "$1""#,
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let invoker = Invoker::with_config(stubs.config());
            std::thread::spawn(move || {
                let file = format!("file_{}.npy", i);
                (i, invoker.invoke(FileFormat::Npy, Path::new(&file)))
            })
        })
        .collect();

    for handle in handles {
        let (i, payload) = handle.join().expect("no panics under concurrency");
        let message = payload.error().expect("stub reports through the error field");
        assert!(message.contains(&format!("file_{}.npy", i)));
    }
}

#[test]
fn cancel_after_completion_is_harmless() {
    let stubs = StubReaders::new();
    stubs.install(
        FileFormat::Npy,
        r#"echo '{"shape": [1], "dtype": "int8", "size": 1, "preview": [1]}'"#,
    );
    let invoker = Invoker::with_config(stubs.config());
    let cancel = CancelToken::new();

    let payload = invoker.invoke_cancellable(FileFormat::Npy, Path::new("weights.npy"), &cancel);
    assert!(!payload.is_error());

    // Tripping the token after the process exited must be a no-op.
    cancel.cancel();
    assert!(cancel.is_cancelled());
}
