// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Positional argument normalization.

use std::collections::VecDeque;
use std::future::Future;

use clirun_capture::Completion;
use serde_json::Value;
use thiserror::Error;

use crate::config::HarnessConfig;
use crate::context::Context;
use crate::done::{CompletionCallback, Done};
use crate::stdin::Stdin;

use super::core::Invocation;
use super::{boxed_entry, CustomizeFn, EntryFn};

/// Malformed invocation shape. Every variant is an invalid-argument error
/// raised before the cli function runs.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("invalid argument: a cli function is required")]
    MissingCli,

    #[error("invalid argument: a callback function is required")]
    MissingCallback,

    #[error("invalid argument: the remaining arguments must all be strings (argument {index} is {kind})")]
    NonStringArgument { index: usize, kind: &'static str },
}

/// One positional value of the loose call shape.
///
/// ```ignore
/// invoke(vec![
///     Arg::cli(my_cli),
///     Arg::customize(|ctx| ctx.argv[1] = "foo-cli".into()),
///     "-p".into(),
///     stdin(["Hello"]).into(),
///     Arg::callback(|completion| { /* assert */ }),
/// ])?;
/// ```
pub enum Arg {
    Cli(EntryFn),
    Customize(CustomizeFn),
    Callback(CompletionCallback),
    Stdin(Stdin),
    /// Plain value; only strings are accepted as arguments
    Value(Value),
}

impl Arg {
    pub fn cli<F, Fut>(cli: F) -> Self
    where
        F: FnOnce(Context, Done) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Arg::Cli(boxed_entry(cli))
    }

    pub fn customize<F>(hook: F) -> Self
    where
        F: FnOnce(&mut Context) + Send + 'static,
    {
        Arg::Customize(Box::new(hook))
    }

    pub fn callback<F>(callback: F) -> Self
    where
        F: FnOnce(Completion) + Send + 'static,
    {
        Arg::Callback(Box::new(callback))
    }

    pub fn null() -> Self {
        Arg::Value(Value::Null)
    }

    /// Short description used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Cli(_) => "a cli function",
            Arg::Customize(_) => "a customize function",
            Arg::Callback(_) => "a callback function",
            Arg::Stdin(_) => "a stdin",
            Arg::Value(Value::Null) => "null",
            Arg::Value(Value::Bool(_)) => "a boolean",
            Arg::Value(Value::Number(_)) => "a number",
            Arg::Value(Value::String(_)) => "a string",
            Arg::Value(Value::Array(_)) => "an array",
            Arg::Value(Value::Object(_)) => "an object",
        }
    }
}

impl std::fmt::Debug for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arg::Stdin(stdin) => f.debug_tuple("Stdin").field(stdin).finish(),
            Arg::Value(value) => f.debug_tuple("Value").field(value).finish(),
            other => f.write_str(other.kind()),
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Value(Value::String(s.to_string()))
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Value(Value::String(s))
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl From<Stdin> for Arg {
    fn from(stdin: Stdin) -> Self {
        Arg::Stdin(stdin)
    }
}

/// Resolve `(cli, [customize], ...args, [stdin], callback)` into an
/// [`Invocation`] using the default [`HarnessConfig`].
///
/// Checks run in a fixed order: cli function first, then callback, then
/// the optional stdin and customize slots, then the string arguments.
/// Nothing runs until [`Invocation::run`] is awaited.
pub fn invoke(args: impl IntoIterator<Item = Arg>) -> Result<Invocation, UsageError> {
    let mut args: VecDeque<Arg> = args.into_iter().collect();

    let Some(Arg::Cli(entry)) = args.pop_front() else {
        return Err(UsageError::MissingCli);
    };

    let Some(Arg::Callback(callback)) = args.pop_back() else {
        return Err(UsageError::MissingCallback);
    };

    let stdin = match args.pop_back() {
        Some(Arg::Stdin(stdin)) => stdin,
        Some(other) => {
            args.push_back(other);
            Stdin::empty()
        }
        None => Stdin::empty(),
    };

    let customize = match args.pop_front() {
        Some(Arg::Customize(hook)) => Some(hook),
        Some(other) => {
            args.push_front(other);
            None
        }
        None => None,
    };

    let argv = args
        .into_iter()
        .enumerate()
        .map(|(index, arg)| match arg {
            Arg::Value(Value::String(s)) => Ok(s),
            other => Err(UsageError::NonStringArgument {
                index,
                kind: other.kind(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let context = Context::new(&HarnessConfig::default(), argv, stdin);
    Ok(Invocation::new(entry, customize, context, callback))
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
