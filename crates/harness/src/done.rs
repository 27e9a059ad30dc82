// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Completion handle passed to the cli function.

use clirun_capture::{Completion, OutputSink};

/// Callback receiving the outcome of a run
pub type CompletionCallback = Box<dyn FnOnce(Completion) + Send>;

/// What the handle needs to deliver a completion.
pub(crate) struct Bridge {
    pub stdout: OutputSink,
    pub stderr: OutputSink,
    pub callback: CompletionCallback,
}

/// The only sanctioned way for a cli function to finish.
///
/// Signalling consumes the handle, so a run completes at most once. The
/// handle may be moved into a spawned task and signalled after the cli
/// function has returned.
#[must_use = "the run only completes when `Done` is signalled"]
pub struct Done {
    bridge: Option<Bridge>,
}

impl Done {
    pub(crate) fn new(bridge: Bridge) -> Self {
        Self {
            bridge: Some(bridge),
        }
    }

    /// Finish with exit code 0
    pub fn finish(self) {
        self.signal(None);
    }

    /// Finish with `code`
    pub fn exit(self, code: i32) {
        self.signal(Some(code));
    }

    /// Finish with an optional code; `None` counts as 0.
    ///
    /// Reads both sinks as they stand right now and hands the result to the
    /// completion callback before returning.
    pub fn signal(mut self, code: Option<i32>) {
        let Some(bridge) = self.bridge.take() else {
            return;
        };
        let completion = Completion::new(bridge.stdout.contents(), bridge.stderr.contents(), code);
        tracing::debug!(
            code = completion.code,
            stdout_len = completion.stdout.len(),
            stderr_len = completion.stderr.len(),
            "cli signalled completion"
        );
        (bridge.callback)(completion);
    }
}

impl Drop for Done {
    fn drop(&mut self) {
        if self.bridge.is_some() {
            tracing::warn!("completion handle dropped without signalling; the callback will never run");
        }
    }
}

impl std::fmt::Debug for Done {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Done")
            .field("pending", &self.bridge.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "done_tests.rs"]
mod tests;
