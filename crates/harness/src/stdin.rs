// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Synthetic stdin.
//!
//! [`Stdin`] hands the program under test its input one chunk at a time.
//! It can be read chunk-wise through [`futures::Stream`] or
//! [`Stdin::next_chunk`], as text through [`Stdin::next_text`], or as bytes
//! through [`tokio::io::AsyncRead`] (which makes it pipeable with
//! [`tokio::io::copy`]).
//!
//! Literal chunks are never delivered inside the poll that asks for them:
//! the first poll schedules a wake-up and returns `Pending`, the next one
//! hands over the chunk. Programs that only work when input arrives
//! synchronously fail here just as they would against a real pipe.
//!
//! [`Stdin::next_chunk`] and [`Stdin::next_text`] track that yield per
//! pull, so dropping a pull after its first `Pending` (say, the losing arm
//! of `tokio::select!`) does not let the next pull deliver immediately.
//! `AsyncRead` and `Stream` have no per-pull state and track it on the
//! source instead; a cancelled read there is followed by one synchronous
//! delivery.

use bytes::Bytes;
use futures::Stream;
use std::collections::VecDeque;
use std::future::poll_fn;
use std::io;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, ReadBuf};

/// Largest chunk produced from a reader-backed source
pub const READ_CHUNK_SIZE: usize = 64 * 1024;

enum Source {
    Chunks(VecDeque<Bytes>),
    Reader(Box<dyn AsyncRead + Send + Unpin>),
}

/// Input stream handed to the program as `stdin`
pub struct Stdin {
    source: Source,
    /// Yield state for `AsyncRead`, `Stream` and `poll_chunk`.
    deferred: bool,
    /// Remainder of a chunk partially consumed through `AsyncRead`.
    pending: Bytes,
    /// Incomplete UTF-8 sequence held back by `next_text`.
    carry: Vec<u8>,
    scratch: Vec<u8>,
    eof: bool,
}

impl Stdin {
    /// A source that ends on first read
    pub fn empty() -> Self {
        Self::with_source(Source::Chunks(VecDeque::new()))
    }

    /// A source yielding `chunks` in order.
    ///
    /// Empty chunks are dropped; they carry no data and would read as
    /// end-of-stream through `AsyncRead`.
    pub fn from_chunks<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        let chunks = chunks
            .into_iter()
            .filter(|c| !c.as_ref().is_empty())
            .map(|c| Bytes::copy_from_slice(c.as_ref()))
            .collect();
        Self::with_source(Source::Chunks(chunks))
    }

    /// A source that delegates to an external reader, such as a file.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        Self::with_source(Source::Reader(Box::new(reader)))
    }

    fn with_source(source: Source) -> Self {
        Self {
            source,
            deferred: false,
            pending: Bytes::new(),
            carry: Vec::new(),
            scratch: Vec::new(),
            eof: false,
        }
    }

    /// Literal chunks not yet delivered (0 for reader-backed sources)
    pub fn remaining_chunks(&self) -> usize {
        match &self.source {
            Source::Chunks(chunks) => chunks.len() + usize::from(!self.pending.is_empty()),
            Source::Reader(_) => 0,
        }
    }

    /// Whether end-of-stream has been reached
    pub fn is_finished(&self) -> bool {
        self.eof && self.pending.is_empty()
    }

    /// Poll for the next chunk; `None` means end-of-stream.
    ///
    /// The yield before each literal chunk is tracked on the source, so
    /// callers that abandon a poll should prefer [`Stdin::next_chunk`].
    pub fn poll_chunk(&mut self, cx: &mut Context<'_>) -> Poll<io::Result<Option<Bytes>>> {
        let mut deferred = self.deferred;
        let poll = self.poll_source(cx, &mut deferred);
        self.deferred = deferred;
        poll
    }

    fn poll_source(
        &mut self,
        cx: &mut Context<'_>,
        deferred: &mut bool,
    ) -> Poll<io::Result<Option<Bytes>>> {
        if !self.pending.is_empty() {
            return Poll::Ready(Ok(Some(std::mem::take(&mut self.pending))));
        }
        if self.eof {
            return Poll::Ready(Ok(None));
        }

        match &mut self.source {
            Source::Chunks(chunks) => {
                if !*deferred {
                    *deferred = true;
                    cx.waker().wake_by_ref();
                    return Poll::Pending;
                }
                *deferred = false;
                match chunks.pop_front() {
                    Some(chunk) => {
                        tracing::trace!(len = chunk.len(), remaining = chunks.len(), "stdin chunk");
                        Poll::Ready(Ok(Some(chunk)))
                    }
                    None => {
                        self.eof = true;
                        tracing::debug!("stdin reached end of stream");
                        Poll::Ready(Ok(None))
                    }
                }
            }
            Source::Reader(reader) => {
                self.scratch.resize(READ_CHUNK_SIZE, 0);
                let mut buf = ReadBuf::new(&mut self.scratch);
                ready!(Pin::new(reader).poll_read(cx, &mut buf))?;
                let filled = buf.filled();
                if filled.is_empty() {
                    self.eof = true;
                    tracing::debug!("stdin reader reached end of stream");
                    Poll::Ready(Ok(None))
                } else {
                    Poll::Ready(Ok(Some(Bytes::copy_from_slice(filled))))
                }
            }
        }
    }

    /// Next raw chunk, or `None` at end-of-stream
    pub async fn next_chunk(&mut self) -> io::Result<Option<Bytes>> {
        let mut deferred = false;
        poll_fn(|cx| self.poll_source(cx, &mut deferred)).await
    }

    /// Next chunk decoded as UTF-8, or `None` at end-of-stream.
    ///
    /// A multi-byte character split across chunks is held back until the
    /// rest of it arrives. Invalid sequences, and a sequence still
    /// incomplete at end-of-stream, are emitted as U+FFFD.
    pub async fn next_text(&mut self) -> io::Result<Option<String>> {
        loop {
            match self.next_chunk().await? {
                Some(chunk) => {
                    if let Some(text) = self.decode(&chunk) {
                        return Ok(Some(text));
                    }
                }
                None if self.carry.is_empty() => return Ok(None),
                None => {
                    let rest = std::mem::take(&mut self.carry);
                    return Ok(Some(String::from_utf8_lossy(&rest).into_owned()));
                }
            }
        }
    }

    fn decode(&mut self, chunk: &[u8]) -> Option<String> {
        let mut bytes = std::mem::take(&mut self.carry);
        bytes.extend_from_slice(chunk);

        let mut text = String::new();
        let mut rest = bytes.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    text.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    text.push_str(std::str::from_utf8(valid).unwrap_or_default());
                    match err.error_len() {
                        Some(len) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            self.carry = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        (!text.is_empty()).then_some(text)
    }

    /// Drain the rest of the stream as text
    pub async fn read_text(&mut self) -> io::Result<String> {
        let mut out = String::new();
        while let Some(text) = self.next_text().await? {
            out.push_str(&text);
        }
        Ok(out)
    }

    /// Copy the rest of the stream into `dst`, then shut `dst` down.
    ///
    /// Returns the number of bytes copied.
    pub async fn pipe<W>(&mut self, dst: &mut W) -> io::Result<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let copied = tokio::io::copy(self, dst).await?;
        dst.shutdown().await?;
        Ok(copied)
    }
}

impl Default for Stdin {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for Stdin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match &self.source {
            Source::Chunks(chunks) => format!("chunks({})", chunks.len()),
            Source::Reader(_) => "reader".to_string(),
        };
        f.debug_struct("Stdin")
            .field("source", &source)
            .field("eof", &self.eof)
            .finish_non_exhaustive()
    }
}

impl Stream for Stdin {
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().poll_chunk(cx).map(Result::transpose)
    }
}

impl AsyncRead for Stdin {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        let mut chunk = match ready!(this.poll_chunk(cx))? {
            Some(chunk) => chunk,
            None => return Poll::Ready(Ok(())),
        };

        let n = chunk.len().min(buf.remaining());
        buf.put_slice(&chunk.split_to(n));
        this.pending = chunk;
        Poll::Ready(Ok(()))
    }
}

impl From<&str> for Stdin {
    fn from(chunk: &str) -> Self {
        Self::from_chunks([chunk])
    }
}

impl From<String> for Stdin {
    fn from(chunk: String) -> Self {
        Self::from_chunks([chunk])
    }
}

impl From<&[u8]> for Stdin {
    fn from(chunk: &[u8]) -> Self {
        Self::from_chunks([chunk])
    }
}

impl From<Vec<u8>> for Stdin {
    fn from(chunk: Vec<u8>) -> Self {
        Self::from_chunks([chunk])
    }
}

impl From<Bytes> for Stdin {
    fn from(chunk: Bytes) -> Self {
        Self::from_chunks([chunk])
    }
}

impl<C: AsRef<[u8]>, const N: usize> From<[C; N]> for Stdin {
    fn from(chunks: [C; N]) -> Self {
        Self::from_chunks(chunks)
    }
}

impl From<Vec<&str>> for Stdin {
    fn from(chunks: Vec<&str>) -> Self {
        Self::from_chunks(chunks)
    }
}

impl From<Vec<String>> for Stdin {
    fn from(chunks: Vec<String>) -> Self {
        Self::from_chunks(chunks)
    }
}

impl From<Vec<Vec<u8>>> for Stdin {
    fn from(chunks: Vec<Vec<u8>>) -> Self {
        Self::from_chunks(chunks)
    }
}

impl From<Vec<Bytes>> for Stdin {
    fn from(chunks: Vec<Bytes>) -> Self {
        Self::from_chunks(chunks)
    }
}

/// Build a synthetic stdin from a single chunk or a sequence of chunks.
///
/// ```ignore
/// let input = clirun::stdin("Hello, World!");
/// let input = clirun::stdin(["Hello", ", ", "World!"]);
/// ```
pub fn stdin(chunks: impl Into<Stdin>) -> Stdin {
    chunks.into()
}

#[cfg(test)]
#[path = "stdin_tests.rs"]
mod tests;
