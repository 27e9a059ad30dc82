// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Stdin sources and output sinks as seen by a running cli function.

mod common;

use clirun::{invoke, stdin, Arg, Context, Done, Invocation, Stdin};
use common::{chunk_reporter, completion_channel, fixture};
use futures::StreamExt;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[tokio::test]
async fn test_file_backed_stdin() {
    let file = tokio::fs::File::open(fixture("testfile.txt")).await.unwrap();
    let (callback, rx) = completion_channel();
    let cli = Arg::cli(|mut ctx: Context, done: Done| async move {
        assert_eq!(ctx.args(), ["arg"]);
        let content = ctx.stdin.read_text().await?;
        assert_eq!(content, "Hello,\nWorld!\n");
        done.finish();
        anyhow::Ok(())
    });

    invoke(vec![cli, "arg".into(), Stdin::from_reader(file).into(), callback])
        .unwrap()
        .run()
        .await
        .unwrap();
    rx.await.unwrap();
}

#[tokio::test]
async fn test_stream_style_consumer() {
    let completion = Invocation::builder(|ctx: Context, done: Done| async move {
        let chunks: Vec<String> = ctx
            .stdin
            .map(|chunk| String::from_utf8(chunk.unwrap().to_vec()).unwrap())
            .collect()
            .await;
        ctx.stdout.write(chunks.join("|"))?;
        done.finish();
        anyhow::Ok(())
    })
    .stdin(["Hello", ", ", "World!"])
    .output()
    .await
    .unwrap();

    assert_eq!(completion.stdout, "Hello|, |World!");
}

#[tokio::test]
async fn test_async_read_consumer() {
    let completion = Invocation::builder(|mut ctx: Context, done: Done| async move {
        let mut input = Vec::new();
        ctx.stdin.read_to_end(&mut input).await?;
        input.reverse();
        ctx.stdout.write_all(&input).await?;
        done.finish();
        anyhow::Ok(())
    })
    .stdin(["abc", "def"])
    .output()
    .await
    .unwrap();

    assert_eq!(completion.stdout, "fedcba");
}

#[tokio::test]
async fn test_multibyte_split_across_stdin_chunks() {
    let completion = Invocation::builder(chunk_reporter)
        .stdin([b"\xF0\x9F".as_slice(), b"\x98\x80 ok".as_slice()])
        .output()
        .await
        .unwrap();

    assert_eq!(completion.stdout, "[\u{1F600} ok]\n");
}

#[tokio::test]
async fn test_pipe_ends_stdout() {
    let completion = Invocation::builder(|mut ctx: Context, done: Done| async move {
        ctx.stdin.pipe(&mut ctx.stdout).await?;
        let late = ctx.stdout.write("late");
        assert!(late.is_err());
        done.finish();
        anyhow::Ok(())
    })
    .stdin(stdin(vec!["a".to_string(), "b".to_string()]))
    .output()
    .await
    .unwrap();

    assert_eq!(completion.stdout, "ab");
}

#[tokio::test]
async fn test_writes_before_done_are_collected() {
    let completion = Invocation::builder(|mut ctx: Context, done: Done| async move {
        {
            use std::io::Write;
            writeln!(ctx.stdout, "sync write")?;
        }
        ctx.stderr.write_all(b"async write").await?;
        done.exit(2);
        anyhow::Ok(())
    })
    .output()
    .await
    .unwrap();

    assert_eq!(completion.stdout, "sync write\n");
    assert_eq!(completion.stderr, "async write");
    assert_eq!(completion.code, 2);
}
