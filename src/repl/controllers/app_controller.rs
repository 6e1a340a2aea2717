//! # Shell Application Controller
//!
//! Drives the read, classify and dispatch cycle. Every command failure
//! is printed and the loop carries on; only the end of input, an
//! interrupt on an empty line, or `exit`/`quit` stop it.

use crate::repl::command::{parse_line, ParsedCommand};
use crate::repl::controllers::RequestDispatcher;
use crate::repl::error::ShellError;
use crate::repl::io::{LineSource, PageControl, ReadOutcome};
use crate::repl::services::Transport;
use crate::repl::session::SessionConfig;
use anyhow::Result;
use std::io::Write;

/// Lines that end the session
const EXIT_COMMANDS: [&str; 2] = ["exit", "quit"];

/// What the loop does after handling a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// The interactive shell
pub struct AppController<L: LineSource, T: Transport, O: Write> {
    session: SessionConfig,
    dispatcher: RequestDispatcher<T>,
    line_source: L,
    output: O,
}

impl<L: LineSource, T: Transport, O: Write> AppController<L, T, O> {
    /// Create the shell with injected I/O (dependency injection).
    ///
    /// Marks the session interactive before the dispatcher is built, so
    /// responses are paginated through `pager`. Messages go to `output`,
    /// rendered responses to `response_out`.
    pub fn with_io<W, P>(
        mut session: SessionConfig,
        transport: T,
        line_source: L,
        output: O,
        response_out: W,
        pager: P,
        page_size: usize,
    ) -> Self
    where
        W: Write + 'static,
        P: PageControl + 'static,
    {
        session.enable_interactive();
        let dispatcher =
            RequestDispatcher::for_session(transport, &session, response_out, pager, page_size);

        Self {
            session,
            dispatcher,
            line_source,
            output,
        }
    }

    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    pub fn dispatcher(&self) -> &RequestDispatcher<T> {
        &self.dispatcher
    }

    /// Run until the input ends or the user leaves
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.line_source.read_line()? {
                ReadOutcome::Eof => {
                    tracing::debug!("End of input, leaving shell");
                    return Ok(());
                }
                ReadOutcome::Interrupted { partial } if partial.is_empty() => {
                    tracing::debug!("Interrupted on empty line, leaving shell");
                    return Ok(());
                }
                ReadOutcome::Interrupted { partial } => {
                    tracing::debug!("Discarding partial input '{}'", partial);
                }
                ReadOutcome::Line(line) => {
                    if self.handle_line(&line)? == LoopControl::Exit {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Handle one submitted line. Errors from the line itself are printed;
    /// only a failure to write that message is returned.
    pub fn handle_line(&mut self, line: &str) -> Result<LoopControl> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(LoopControl::Continue);
        }
        if EXIT_COMMANDS.contains(&line) {
            return Ok(LoopControl::Exit);
        }

        if let Err(e) = self.execute(line) {
            tracing::debug!("Command '{}' failed: {:?}", line, e);
            writeln!(self.output, "{e}")?;
            self.output.flush()?;
        }
        Ok(LoopControl::Continue)
    }

    fn execute(&mut self, line: &str) -> Result<(), ShellError> {
        match parse_line(line)? {
            Some(ParsedCommand::Admin(command)) => {
                self.session.apply(command);
                Ok(())
            }
            Some(ParsedCommand::Request(request)) => {
                self.dispatcher.dispatch(&self.session, &request)
            }
            None => Ok(()),
        }
    }
}
