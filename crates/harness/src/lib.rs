// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run command-line programs as plain function calls in tests.
//!
//! A cli function takes a [`Context`] (argv, stdin, stdout, stderr and an
//! exit guard) and a [`Done`] handle, does its work, and signals [`Done`]
//! when finished. The harness hands back everything written to stdout and
//! stderr along with the exit code, without spawning a process.
//!
//! ```ignore
//! use clirun::{Context, Done, Invocation};
//!
//! async fn cat(mut ctx: Context, done: Done) -> anyhow::Result<()> {
//!     ctx.stdin.pipe(&mut ctx.stdout).await?;
//!     done.finish();
//!     Ok(())
//! }
//!
//! let completion = Invocation::builder(cat)
//!     .stdin(["Hello", ", ", "World!"])
//!     .output()
//!     .await?;
//! assert_eq!(completion.stdout, "Hello, World!");
//! ```
//!
//! The loose positional form is available through [`invoke`]:
//!
//! ```ignore
//! invoke(vec![Arg::cli(cat), "-p".into(), stdin("input").into(), Arg::callback(|c| {})])?
//!     .run()
//!     .await?;
//! ```

pub mod config;
pub mod context;
pub mod done;
pub mod invocation;
pub mod stdin;

pub use clirun_capture::{Completion, OutputSink};
pub use config::{ConfigError, HarnessConfig};
pub use context::{Context, ExitGuard, ExitNotTestable};
pub use done::Done;
pub use invocation::{invoke, Arg, Invocation, InvocationBuilder, RunError, UsageError};
pub use stdin::{stdin, Stdin};
