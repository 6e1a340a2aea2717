//! # Shell Implementation
//!
//! The pieces of the interactive shell, leaves first:
//!
//! ```text
//! ┌────────────────┐   ParsedCommand   ┌──────────────────┐  HttpCall   ┌───────────┐
//! │ AppController  │──────────────────▶│ RequestDispatcher│────────────▶│ Transport │
//! │ (shell loop)   │                   │                  │◀────────────│           │
//! └───────┬────────┘                   └────────┬─────────┘ResponseStream└───────────┘
//!         │ AdminCommand                        │ format_json
//!         ▼                                     ▼
//! ┌────────────────┐                   ┌──────────────────┐
//! │ SessionConfig  │                   │ JsonFormatter    │
//! └────────────────┘                   │ (batch/paginated)│
//!                                      └──────────────────┘
//! ```

pub mod command;
pub mod controllers;
pub mod error;
pub mod io;
pub mod services;
pub mod session;
pub mod utils;
pub mod views;

// Re-export core types
pub use command::{parse_line, AdminCommand, ParsedCommand, RequestCommand};
pub use controllers::{AppController, LoopControl, RequestDispatcher};
pub use error::ShellError;
pub use session::SessionConfig;
