// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only output sink.

use parking_lot::Mutex;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::io::AsyncWrite;

/// In-memory stand-in for stdout or stderr.
///
/// Every write is appended to a shared buffer and completes immediately.
/// Clones are handles to the same buffer, so the harness can keep one
/// handle while the program under test owns another.
///
/// Bytes are kept as written and decoded as UTF-8 only when read, so a
/// character split across two writes survives intact.
#[derive(Clone, Default)]
pub struct OutputSink {
    inner: Arc<Mutex<SinkState>>,
}

#[derive(Default)]
struct SinkState {
    buf: Vec<u8>,
    writes: usize,
    ended: bool,
}

impl OutputSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `data` to the sink.
    ///
    /// Fails with [`io::ErrorKind::BrokenPipe`] once the sink has been ended.
    pub fn write(&self, data: impl AsRef<[u8]>) -> io::Result<()> {
        let mut state = self.inner.lock();
        if state.ended {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "write after end",
            ));
        }
        let data = data.as_ref();
        if !data.is_empty() {
            state.buf.extend_from_slice(data);
            state.writes += 1;
        }
        Ok(())
    }

    /// Mark the sink as finished. Later writes fail.
    pub fn end(&self) {
        self.inner.lock().ended = true;
    }

    /// Whether [`end`](Self::end) has been called
    pub fn is_ended(&self) -> bool {
        self.inner.lock().ended
    }

    /// Everything written so far, decoded as UTF-8.
    ///
    /// Invalid sequences are replaced with U+FFFD.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().buf).into_owned()
    }

    /// Raw bytes written so far
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.lock().buf.clone()
    }

    /// Number of non-empty writes accepted
    pub fn write_count(&self) -> usize {
        self.inner.lock().writes
    }

    /// Number of bytes written
    pub fn len(&self) -> usize {
        self.inner.lock().buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().buf.is_empty()
    }
}

impl std::fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("OutputSink")
            .field("len", &state.buf.len())
            .field("writes", &state.writes)
            .field("ended", &state.ended)
            .finish()
    }
}

impl io::Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        OutputSink::write(self, buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl AsyncWrite for OutputSink {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        if buf.is_empty() {
            return Poll::Ready(Ok(0));
        }
        Poll::Ready(OutputSink::write(&self, buf).map(|()| buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        tracing::debug!(len = self.len(), "output sink ended");
        self.end();
        Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
