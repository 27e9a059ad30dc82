// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! InvocationBuilder for constructing an Invocation with a fluent API.

use std::future::Future;

use clirun_capture::Completion;
use tokio::sync::oneshot;

use crate::config::HarnessConfig;
use crate::context::Context;
use crate::done::Done;
use crate::stdin::Stdin;

use super::core::{Invocation, RunError};
use super::{boxed_entry, CustomizeFn, EntryFn};

/// Builder for invocations with typed fields.
///
/// ```ignore
/// let completion = Invocation::builder(cat)
///     .arg("-n")
///     .stdin(["Hello", ", ", "World!"])
///     .output()
///     .await?;
/// ```
pub struct InvocationBuilder {
    entry: EntryFn,
    customize: Option<CustomizeFn>,
    args: Vec<String>,
    stdin: Option<Stdin>,
    config: HarnessConfig,
}

impl InvocationBuilder {
    pub fn new<F, Fut>(cli: F) -> Self
    where
        F: FnOnce(Context, Done) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            entry: boxed_entry(cli),
            customize: None,
            args: Vec::new(),
            stdin: None,
            config: HarnessConfig::default(),
        }
    }

    /// Hook that may rewrite the context before the cli function sees it
    pub fn customize<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(&mut Context) + Send + 'static,
    {
        self.customize = Some(Box::new(hook));
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Input for the cli function; defaults to an empty stream
    pub fn stdin(mut self, stdin: impl Into<Stdin>) -> Self {
        self.stdin = Some(stdin.into());
        self
    }

    pub fn config(mut self, config: HarnessConfig) -> Self {
        self.config = config;
        self
    }

    /// Finish the builder with a completion callback.
    pub fn on_complete<F>(self, callback: F) -> Invocation
    where
        F: FnOnce(Completion) + Send + 'static,
    {
        let context = Context::new(
            &self.config,
            self.args,
            self.stdin.unwrap_or_default(),
        );
        Invocation::new(
            self.entry,
            self.customize,
            context,
            Box::new(callback),
        )
    }

    /// Run to completion and return the captured output.
    ///
    /// Fails with [`RunError::Abandoned`] if the cli function drops its
    /// [`Done`] handle without signalling.
    pub async fn output(self) -> Result<Completion, RunError> {
        let (tx, rx) = oneshot::channel();
        self.on_complete(move |completion| {
            let _ = tx.send(completion);
        })
        .run()
        .await?;
        rx.await.map_err(|_| RunError::Abandoned)
    }
}

impl std::fmt::Debug for InvocationBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocationBuilder")
            .field("args", &self.args)
            .field("stdin", &self.stdin)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
