// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use std::sync::Mutex;
use std::sync::Arc;

type Received = Arc<Mutex<Vec<Completion>>>;

fn make_done() -> (Done, OutputSink, OutputSink, Received) {
    let stdout = OutputSink::new();
    let stderr = OutputSink::new();
    let received: Received = Arc::default();
    let sink = Arc::clone(&received);
    let done = Done::new(Bridge {
        stdout: stdout.clone(),
        stderr: stderr.clone(),
        callback: Box::new(move |c| sink.lock().unwrap().push(c)),
    });
    (done, stdout, stderr, received)
}

#[test]
fn test_finish_defaults_code_to_zero() {
    let (done, _, _, received) = make_done();
    done.finish();

    assert_eq!(received.lock().unwrap().as_slice(), [Completion::default()]);
}

#[test]
fn test_exit_passes_code_and_output() {
    let (done, stdout, stderr, received) = make_done();
    stdout.write("Hello, ").unwrap();
    stderr.write("error").unwrap();
    stdout.write("World!").unwrap();
    done.exit(1);

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0], Completion::new("Hello, World!", "error", Some(1)));
}

#[test]
fn test_signal_zero_is_zero() {
    let (done, _, _, received) = make_done();
    done.signal(Some(0));
    assert_eq!(received.lock().unwrap()[0].code, 0);
}

#[test]
fn test_output_snapshot_taken_at_signal() {
    let (done, stdout, _, received) = make_done();
    stdout.write("before").unwrap();
    done.finish();
    stdout.write(" after").unwrap();

    assert_eq!(received.lock().unwrap()[0].stdout, "before");
}

#[test]
fn test_drop_without_signal_skips_callback() {
    let (done, _, _, received) = make_done();
    drop(done);
    assert!(received.lock().unwrap().is_empty());
}

#[test]
fn test_debug_shows_pending() {
    let (done, _, _, _) = make_done();
    assert_eq!(format!("{:?}", done), "Done { pending: true }");
    done.finish();
}
