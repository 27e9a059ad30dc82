// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output capture for in-process CLI runs.
//!
//! This crate provides the in-memory sinks that stand in for a program's
//! stdout and stderr, and the [`Completion`] record handed back when a run
//! finishes.

mod completion;
mod sink;

pub use completion::Completion;
pub use sink::OutputSink;
