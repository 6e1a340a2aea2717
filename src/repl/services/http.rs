//! # HTTP Service
//!
//! The transport seam: sends one request and hands back the response as
//! a [`ResponseStream`] the caller owns until it is closed.

use anyhow::Result;
use encoding_rs::{Encoding, UTF_8};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Version};
use std::io::Read;

use crate::repl::command::RequestCommand;
use crate::repl::session::SessionConfig;

/// Everything the transport needs for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCall {
    pub method: String,
    pub url: String,
    pub body: String,
    pub user: Option<String>,
    pub pass: Option<String>,
}

impl HttpCall {
    /// Resolve a request command against the current session endpoint and credentials
    pub fn from_session(session: &SessionConfig, request: &RequestCommand) -> Self {
        Self {
            method: request.method.clone(),
            url: session.endpoint(&request.url),
            body: request.body.clone(),
            user: session.user().map(str::to_string),
            pass: session.pass().map(str::to_string),
        }
    }
}

/// Performs HTTP calls on behalf of the dispatcher
pub trait Transport {
    /// Send the call; an error means no response stream was produced
    fn handle_call(&self, call: &HttpCall) -> Result<ResponseStream>;
}

/// A response whose body has not been read yet.
///
/// The body can be borrowed for reading exactly once. `close` (or drop)
/// releases it, which for a network response returns or tears down the
/// underlying connection.
pub struct ResponseStream {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    body: Option<Box<dyn Read + Send>>,
    consumed: bool,
}

impl ResponseStream {
    pub fn new(
        status: StatusCode,
        version: Version,
        headers: HeaderMap,
        body: impl Read + Send + 'static,
    ) -> Self {
        Self {
            status,
            version,
            headers,
            body: Some(Box::new(body)),
            consumed: false,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Status line such as `HTTP/1.1 200 OK`
    pub fn status_line(&self) -> String {
        format!("{:?} {}", self.version, self.status)
    }

    /// Character encoding named by the `Content-Type` charset, UTF-8 otherwise
    pub fn charset(&self) -> &'static Encoding {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|content_type| {
                content_type
                    .split(';')
                    .filter_map(|param| param.trim().strip_prefix("charset="))
                    .next()
            })
            .and_then(|label| Encoding::for_label(label.trim_matches('"').as_bytes()))
            .unwrap_or(UTF_8)
    }

    /// Borrow the body for reading. Returns `None` once it has been
    /// handed out before or the stream is closed.
    pub fn body(&mut self) -> Option<&mut (dyn Read + Send + 'static)> {
        if self.consumed {
            return None;
        }
        self.consumed = true;
        self.body.as_deref_mut()
    }

    /// Release the body. Safe to call more than once.
    pub fn close(&mut self) {
        if self.body.take().is_some() {
            tracing::debug!("Released response stream ({})", self.status);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.body.is_none()
    }
}

impl Drop for ResponseStream {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for ResponseStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseStream")
            .field("status", &self.status)
            .field("version", &self.version)
            .field("headers", &self.headers)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Transport backed by a blocking reqwest client
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        tracing::debug!("Creating blocking HTTP client");
        let client = Client::builder().build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn handle_call(&self, call: &HttpCall) -> Result<ResponseStream> {
        let method = Method::from_bytes(call.method.as_bytes())
            .map_err(|e| anyhow::anyhow!("invalid method {}: {e}", call.method))?;

        tracing::info!("{} {}", method, call.url);
        let mut request = self.client.request(method, &call.url);

        if !call.body.is_empty() {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(call.body.clone());
        }

        if let Some(user) = &call.user {
            request = request.basic_auth(user, call.pass.as_ref());
        }

        let response = request
            .send()
            .map_err(|e| anyhow::anyhow!("HTTP request failed: {e}"))?;

        tracing::debug!("Received {} from {}", response.status(), call.url);
        Ok(ResponseStream::new(
            response.status(),
            response.version(),
            response.headers().clone(),
            response,
        ))
    }
}
