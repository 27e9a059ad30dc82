// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Validated invocation and the run cycle.

use futures::future::BoxFuture;
use std::future::Future;
use thiserror::Error;

use crate::context::Context;
use crate::done::{Bridge, CompletionCallback, Done};

use super::builder::InvocationBuilder;
use super::{CustomizeFn, EntryFn};

/// Future returned by a cli function
pub type CliFuture = BoxFuture<'static, anyhow::Result<()>>;

/// Errors that can occur while running an invocation
#[derive(Debug, Error)]
pub enum RunError {
    /// The cli function returned an error. It is passed through unchanged;
    /// the completion callback is not involved.
    #[error(transparent)]
    Cli(anyhow::Error),

    #[error("the cli function dropped its completion handle without signalling completion")]
    Abandoned,
}

impl RunError {
    /// The cli function's own error, if that is what this is
    pub fn cli_error(&self) -> Option<&anyhow::Error> {
        match self {
            RunError::Cli(err) => Some(err),
            RunError::Abandoned => None,
        }
    }
}

/// A cli function together with everything needed to run it once.
pub struct Invocation {
    entry: EntryFn,
    customize: Option<CustomizeFn>,
    context: Context,
    callback: CompletionCallback,
}

impl Invocation {
    pub(crate) fn new(
        entry: EntryFn,
        customize: Option<CustomizeFn>,
        context: Context,
        callback: CompletionCallback,
    ) -> Self {
        Self {
            entry,
            customize,
            context,
            callback,
        }
    }

    /// Start building an invocation of `cli`.
    pub fn builder<F, Fut>(cli: F) -> InvocationBuilder
    where
        F: FnOnce(Context, Done) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        InvocationBuilder::new(cli)
    }

    /// The context as it will be handed over (before customization)
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Run the cli function.
    ///
    /// Applies the customization hook, then calls the cli function with the
    /// context and a [`Done`] handle and awaits it. The completion callback
    /// fires when `Done` is signalled, which may be before or after this
    /// future resolves. An error returned by the cli function is surfaced
    /// here as [`RunError::Cli`].
    pub async fn run(self) -> Result<(), RunError> {
        let Self {
            entry,
            customize,
            mut context,
            callback,
        } = self;

        if let Some(hook) = customize {
            hook(&mut context);
        }

        tracing::debug!(argv = ?context.argv, "invoking cli function");

        let done = Done::new(Bridge {
            stdout: context.stdout.clone(),
            stderr: context.stderr.clone(),
            callback,
        });

        entry(context, done).await.map_err(|err| {
            tracing::debug!(error = %err, "cli function failed");
            RunError::Cli(err)
        })
    }
}

impl std::fmt::Debug for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("context", &self.context)
            .field("customize", &self.customize.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "core_tests.rs"]
mod tests;
