// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The record handed back when a run completes.

use serde::{Deserialize, Serialize};

/// What a finished run hands back: captured output and the exit code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Everything written to stdout
    pub stdout: String,

    /// Everything written to stderr
    pub stderr: String,

    /// Exit code (0 unless the program reported otherwise)
    pub code: i32,
}

impl Completion {
    /// Build a completion, treating a missing code as success.
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, code: Option<i32>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            code: code.unwrap_or(0),
        }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Split into `(stdout, stderr, code)`
    pub fn into_parts(self) -> (String, String, i32) {
        (self.stdout, self.stderr, self.code)
    }
}

#[cfg(test)]
#[path = "completion_tests.rs"]
mod tests;
