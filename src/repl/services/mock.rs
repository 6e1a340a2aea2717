//! # Mock Transport for Testing
//!
//! Serves pre-programmed responses and records every call, so the
//! dispatcher and shell loop can be exercised without a server.

use super::http::{HttpCall, ResponseStream, Transport};
use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{StatusCode, Version};
use std::collections::VecDeque;
use std::io::{Cursor, Read};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Observes what happened to a [`TrackedBody`] after it was handed off
#[derive(Debug, Clone, Default)]
pub struct BodyProbe {
    released: Arc<AtomicBool>,
    bytes_read: Arc<AtomicUsize>,
    read_calls: Arc<AtomicUsize>,
}

impl BodyProbe {
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    pub fn bytes_read(&self) -> usize {
        self.bytes_read.load(Ordering::SeqCst)
    }

    /// Number of `read` calls made on the body
    pub fn read_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }
}

/// In-memory body that reports reads and release to its probe
pub struct TrackedBody {
    inner: Cursor<Vec<u8>>,
    probe: BodyProbe,
}

impl TrackedBody {
    pub fn new(body: impl Into<Vec<u8>>) -> (Self, BodyProbe) {
        let probe = BodyProbe::default();
        (
            Self {
                inner: Cursor::new(body.into()),
                probe: probe.clone(),
            },
            probe,
        )
    }
}

impl Read for TrackedBody {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        // Hand out small chunks so streaming readers cannot slurp the body in one call
        let limit = buf.len().min(16);
        let n = self.inner.read(&mut buf[..limit])?;
        self.probe.bytes_read.fetch_add(n, Ordering::SeqCst);
        self.probe.read_calls.fetch_add(1, Ordering::SeqCst);
        Ok(n)
    }
}

impl Drop for TrackedBody {
    fn drop(&mut self) {
        self.probe.released.store(true, Ordering::SeqCst);
    }
}

/// Build a JSON response stream around `body`, returning its probe
pub fn json_response(status: StatusCode, body: &str) -> (ResponseStream, BodyProbe) {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let (body, probe) = TrackedBody::new(body);
    (
        ResponseStream::new(status, Version::HTTP_11, headers, body),
        probe,
    )
}

/// Type alias for the recorded call log
type CallLog = Arc<Mutex<Vec<HttpCall>>>;

/// Transport returning queued results in order
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<ResponseStream>>>,
    calls: CallLog,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn push_response(&self, response: ResponseStream) {
        self.lock_responses().push_back(Ok(response));
    }

    /// Queue a transport failure
    pub fn push_error(&self, message: &str) {
        self.lock_responses()
            .push_back(Err(anyhow::anyhow!(message.to_string())));
    }

    /// Shared handle to the calls seen so far
    pub fn call_log(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    pub fn calls(&self) -> Vec<HttpCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<ResponseStream>>> {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Transport for MockTransport {
    fn handle_call(&self, call: &HttpCall) -> Result<ResponseStream> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call.clone());
        }
        self.lock_responses()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("No responses queued in mock transport")))
    }
}
