//! # Utils Module
//!
//! Contains parsing helpers used by the shell.

pub mod http_parser;

// Re-export main types for convenience
pub use http_parser::{RequestParser, SUPPORTED_METHODS};
