// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The process-like context handed to the program under test.

use crate::config::HarnessConfig;
use crate::stdin::Stdin;
use clirun_capture::OutputSink;
use serde_json::{Map, Value};
use std::convert::Infallible;
use thiserror::Error;

/// Returned when the program under test tries to end the process itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("don't call exit({code}) in your cli function, it is not testable; signal completion through `Done` instead")]
pub struct ExitNotTestable {
    /// Code the program tried to exit with
    pub code: i32,
}

/// Stand-in for the process exit primitive. It never exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitGuard;

impl ExitGuard {
    /// Always fails with [`ExitNotTestable`].
    pub fn terminate(&self, code: i32) -> Result<Infallible, ExitNotTestable> {
        tracing::debug!(code, "cli attempted to exit the process");
        Err(ExitNotTestable { code })
    }
}

/// Synthetic process context for a single invocation.
///
/// Built once per run and owned by the cli function once it is called.
/// A customization hook may rewrite any field first.
#[derive(Debug)]
pub struct Context {
    /// Two placeholder entries followed by the supplied arguments
    pub argv: Vec<String>,
    pub stdin: Stdin,
    pub stdout: OutputSink,
    pub stderr: OutputSink,
    pub exit: ExitGuard,
    /// Free-form values a customization hook can pass to the cli function
    pub vars: Map<String, Value>,
}

impl Context {
    pub fn new(config: &HarnessConfig, args: Vec<String>, stdin: Stdin) -> Self {
        Self {
            argv: config.argv(args),
            stdin,
            stdout: OutputSink::new(),
            stderr: OutputSink::new(),
            exit: ExitGuard,
            vars: Map::new(),
        }
    }

    /// Arguments after the two placeholder entries
    pub fn args(&self) -> &[String] {
        self.argv.get(2..).unwrap_or_default()
    }

    /// Set a free-form value
    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn var(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
