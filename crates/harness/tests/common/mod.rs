// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared helpers for harness integration tests.

#![allow(dead_code)]

use clirun::{Arg, Completion, Context, Done};
use std::path::PathBuf;
use tokio::sync::oneshot;

/// Callback argument paired with a receiver for the completion it gets.
pub fn completion_channel() -> (Arg, oneshot::Receiver<Completion>) {
    let (tx, rx) = oneshot::channel();
    let callback = Arg::callback(move |completion| {
        let _ = tx.send(completion);
    });
    (callback, rx)
}

/// Callback that ignores the completion
pub fn ignore() -> Arg {
    Arg::callback(|_| {})
}

/// Cli function that finishes immediately
pub async fn noop(_ctx: Context, done: Done) -> anyhow::Result<()> {
    done.finish();
    Ok(())
}

/// Cli function that reads stdin chunk by chunk as text and reports each
/// chunk on its own stdout line, in `[chunk]` form.
pub async fn chunk_reporter(mut ctx: Context, done: Done) -> anyhow::Result<()> {
    while let Some(chunk) = ctx.stdin.next_text().await? {
        ctx.stdout.write(format!("[{}]\n", chunk))?;
    }
    done.finish();
    Ok(())
}

/// Path to a file under `tests/fixtures`
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
