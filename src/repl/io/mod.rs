//! # I/O Abstraction Layer
//!
//! Trait seams for everything the shell reads from the user, so the loop
//! and the pager can be driven by scripts in tests.
//!
//! ## Architecture
//!
//! ```text
//! Production:  AppController ──▶ TerminalLineSource ──▶ reedline (history, completion)
//!              Interactive formatter ──▶ TerminalPager ──▶ crossterm::event::read()
//!
//! Testing:     AppController ──▶ MockLineSource ──▶ VecDeque<ReadOutcome>
//!              Interactive formatter ──▶ MockPager ──▶ VecDeque<PageSignal>
//! ```

use anyhow::Result;

pub mod mock;
pub mod terminal;

// Re-export terminal implementations for convenience
pub use terminal::{ShellCompleter, ShellPrompt, TerminalLineSource, TerminalPager};

// Re-export mock implementations for testing
pub use mock::{MockLineSource, MockPager, SharedWriter};

/// What one attempt to read a line produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A submitted line, untrimmed
    Line(String),
    /// Interrupt (Ctrl-C); `partial` is whatever was typed before it
    Interrupted { partial: String },
    /// End of input (Ctrl-D or a closed stream)
    Eof,
}

/// Line input for the shell loop
pub trait LineSource {
    /// Block until the user submits a line, interrupts, or input ends
    fn read_line(&mut self) -> Result<ReadOutcome>;
}

/// The user's answer at a page boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSignal {
    Continue,
    Stop,
}

/// Supplies the continue/stop signal between pages of interactive output
pub trait PageControl {
    /// Block until the user asks for the next page or ends pagination
    fn wait_for_continue(&mut self) -> Result<PageSignal>;
}
