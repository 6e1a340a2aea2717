//! # Controllers Module
//!
//! Contains the shell loop and the request dispatcher it drives.

pub mod app_controller;
pub mod dispatcher;

// Re-export main types for convenience
pub use app_controller::{AppController, LoopControl};
pub use dispatcher::RequestDispatcher;
