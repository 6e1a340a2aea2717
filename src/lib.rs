//! # ElasticShell - Interactive JSON Shell for HTTP Endpoints
//!
//! Type `GET /_cluster/health` and get pretty-printed JSON back. Lines
//! starting with `set` change where and how requests are sent instead.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  line   ┌──────────────┐ request  ┌──────────────────┐
//! │ LineSource  │────────▶│ AppController│─────────▶│ RequestDispatcher│
//! │ (reedline)  │         │ (shell loop) │          │                  │
//! └─────────────┘         └──────┬───────┘          └────────┬─────────┘
//!                                │ set ...                   │
//!                                ▼                           ▼
//!                         ┌──────────────┐          ┌──────────────────┐
//!                         │SessionConfig │          │ Transport +      │
//!                         │              │          │ JsonFormatter    │
//!                         └──────────────┘          └──────────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod repl;

// Re-export main types for easy access
pub use repl::*;
