//! # Services Layer
//!
//! Wraps the external resources the shell talks to. The transport is
//! the only one: it turns an [`HttpCall`] into a [`ResponseStream`].

pub mod http;
pub mod mock;

// Re-export service types
pub use http::{HttpCall, HttpTransport, ResponseStream, Transport};
pub use mock::{json_response, BodyProbe, MockTransport, TrackedBody};
