//! # Mock I/O Implementations for Testing
//!
//! Scripted line input, scripted pager answers and a capturing writer.

use super::{LineSource, PageControl, PageSignal, ReadOutcome};
use anyhow::Result;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Line source that replays pre-programmed outcomes, then reports end of input
#[derive(Debug, Default)]
pub struct MockLineSource {
    outcomes: VecDeque<ReadOutcome>,
}

impl MockLineSource {
    pub fn new(outcomes: Vec<ReadOutcome>) -> Self {
        Self {
            outcomes: outcomes.into(),
        }
    }

    /// Script a sequence of submitted lines
    pub fn from_lines(lines: &[&str]) -> Self {
        Self::new(
            lines
                .iter()
                .map(|line| ReadOutcome::Line(line.to_string()))
                .collect(),
        )
    }

    pub fn pending_count(&self) -> usize {
        self.outcomes.len()
    }
}

impl LineSource for MockLineSource {
    fn read_line(&mut self) -> Result<ReadOutcome> {
        Ok(self.outcomes.pop_front().unwrap_or(ReadOutcome::Eof))
    }
}

/// Pager that answers from a queue and counts how often it was asked
#[derive(Debug, Default)]
pub struct MockPager {
    signals: VecDeque<PageSignal>,
    prompts: Arc<Mutex<usize>>,
}

impl MockPager {
    pub fn new(signals: Vec<PageSignal>) -> Self {
        Self {
            signals: signals.into(),
            prompts: Arc::new(Mutex::new(0)),
        }
    }

    /// Shared counter of page-boundary prompts, readable after the pager is moved
    pub fn prompt_counter(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.prompts)
    }
}

impl PageControl for MockPager {
    fn wait_for_continue(&mut self) -> Result<PageSignal> {
        if let Ok(mut count) = self.prompts.lock() {
            *count += 1;
        }
        self.signals
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No page signals available"))
    }
}

/// Cloneable writer whose contents can be read back after it is handed off
#[derive(Debug, Clone, Default)]
pub struct SharedWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl SharedWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .map(|buf| String::from_utf8_lossy(&buf).to_string())
            .unwrap_or_default()
    }
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self
            .buffer
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "shared writer poisoned"))?;
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
