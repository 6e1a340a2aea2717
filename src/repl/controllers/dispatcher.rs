//! # Request Dispatcher
//!
//! Sends one request through the transport and renders the response
//! with the formatter chosen when the dispatcher was built.

use std::io::Write;

use crate::repl::command::RequestCommand;
use crate::repl::error::ShellError;
use crate::repl::io::PageControl;
use crate::repl::services::{HttpCall, Transport};
use crate::repl::session::SessionConfig;
use crate::repl::views::{BatchFormatter, FormatterMode, InteractiveFormatter, JsonFormatter};

/// Owns the transport and the formatter for the life of the process
pub struct RequestDispatcher<T: Transport> {
    transport: T,
    formatter: Box<dyn JsonFormatter>,
    mode: FormatterMode,
}

impl<T: Transport> RequestDispatcher<T> {
    pub fn new(transport: T, formatter: Box<dyn JsonFormatter>, mode: FormatterMode) -> Self {
        Self {
            transport,
            formatter,
            mode,
        }
    }

    /// Pick the formatter from the session's interactive flag as it is now.
    ///
    /// Later changes to the flag do not affect this dispatcher.
    pub fn for_session<W, P>(
        transport: T,
        session: &SessionConfig,
        out: W,
        pager: P,
        page_size: usize,
    ) -> Self
    where
        W: Write + 'static,
        P: PageControl + 'static,
    {
        let mode = FormatterMode::for_session(session);
        let formatter: Box<dyn JsonFormatter> = match mode {
            FormatterMode::Batch => Box::new(BatchFormatter::new(out)),
            FormatterMode::Interactive => {
                Box::new(InteractiveFormatter::new(out, pager, page_size))
            }
        };
        tracing::debug!("Request dispatcher using {:?} formatter", mode);
        Self::new(transport, formatter, mode)
    }

    pub fn mode(&self) -> FormatterMode {
        self.mode
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `request` and render the response.
    ///
    /// The response stream is closed before this returns, whether or not
    /// rendering succeeded. `verbose` is read from `session` on every call.
    pub fn dispatch(
        &mut self,
        session: &SessionConfig,
        request: &RequestCommand,
    ) -> Result<(), ShellError> {
        let call = HttpCall::from_session(session, request);
        tracing::debug!("Dispatching {} {}", call.method, call.url);

        let mut response = self.transport.handle_call(&call)?;
        let result = self.formatter.format_json(&mut response, session.verbose());
        response.close();

        if let Err(e) = &result {
            tracing::debug!("Rendering {} {} failed: {}", call.method, call.url, e);
        }
        result
    }
}
