// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Invocation module for running a cli function in-process.
//!
//! This module provides:
//! - [`invoke`] - Normalizer for the loose positional call shape
//! - [`InvocationBuilder`] - Fluent API with typed fields
//! - [`Invocation`] - A validated run, ready to execute

mod args;
mod builder;
mod core;

pub use args::{invoke, Arg, UsageError};
pub use builder::InvocationBuilder;
pub use self::core::{CliFuture, Invocation, RunError};

use crate::context::Context;
use crate::done::Done;
use std::future::Future;

/// Boxed cli function
pub type EntryFn = Box<dyn FnOnce(Context, Done) -> CliFuture + Send>;
/// Boxed customization hook
pub type CustomizeFn = Box<dyn FnOnce(&mut Context) + Send>;

pub(crate) fn boxed_entry<F, Fut>(cli: F) -> EntryFn
where
    F: FnOnce(Context, Done) -> Fut + Send + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Box::new(move |ctx: Context, done: Done| -> CliFuture { Box::pin(cli(ctx, done)) })
}
