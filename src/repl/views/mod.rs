//! # Views Module
//!
//! Renders response bodies for the terminal.

pub mod json_formatter;

// Re-export main types for convenience
pub use json_formatter::{BatchFormatter, FormatterMode, InteractiveFormatter, JsonFormatter};
