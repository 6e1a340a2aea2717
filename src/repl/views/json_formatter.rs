//! # JSON Response Formatters
//!
//! Two renderings of a response body behind one trait:
//!
//! - [`BatchFormatter`] reads the whole body and prints it in one pass.
//! - [`InteractiveFormatter`] pulls documents off the stream as it
//!   goes and stops at every page boundary until the pager says to
//!   continue.
//!
//! A body may hold one JSON document or several concatenated ones
//! (newline-delimited output). Both formatters render each document
//! with `serde_json`'s pretty printer, so paging the interactive output
//! and concatenating the pages yields the batch output exactly.

use encoding_rs::UTF_8;
use serde_json::{Deserializer, Value};
use std::collections::VecDeque;
use std::io::{BufReader, Cursor, Read, Write};

use crate::repl::error::ShellError;
use crate::repl::io::{PageControl, PageSignal};
use crate::repl::services::ResponseStream;
use crate::repl::session::SessionConfig;

/// Which formatter a dispatcher uses for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatterMode {
    Batch,
    Interactive,
}

impl FormatterMode {
    pub fn for_session(session: &SessionConfig) -> Self {
        if session.interactive() {
            Self::Interactive
        } else {
            Self::Batch
        }
    }
}

/// Renders a held response stream as JSON text
pub trait JsonFormatter {
    /// Consume the body of `response` and render it.
    ///
    /// With `verbose`, the status line and headers come first.
    fn format_json(&mut self, response: &mut ResponseStream, verbose: bool)
        -> Result<(), ShellError>;
}

/// Status line, one `name: value` line per header, then a blank separator
fn metadata_lines(response: &ResponseStream) -> Vec<String> {
    let mut lines = vec![response.status_line()];
    lines.extend(response.headers().iter().map(|(name, value)| {
        format!("{}: {}", name, String::from_utf8_lossy(value.as_bytes()))
    }));
    lines.push(String::new());
    lines
}

fn pretty_lines(document: &Value) -> Result<Vec<String>, ShellError> {
    let pretty = serde_json::to_string_pretty(document).map_err(ShellError::render)?;
    Ok(pretty.lines().map(str::to_string).collect())
}

fn take_body(
    response: &mut ResponseStream,
) -> Result<&mut (dyn Read + Send + 'static), ShellError> {
    response
        .body()
        .ok_or_else(|| ShellError::render("response body was already consumed"))
}

/// Single-pass formatter
pub struct BatchFormatter<W: Write> {
    out: W,
}

impl<W: Write> BatchFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> JsonFormatter for BatchFormatter<W> {
    fn format_json(
        &mut self,
        response: &mut ResponseStream,
        verbose: bool,
    ) -> Result<(), ShellError> {
        if verbose {
            for line in metadata_lines(response) {
                writeln!(self.out, "{line}").map_err(ShellError::render)?;
            }
        }

        let charset = response.charset();
        let mut bytes = Vec::new();
        take_body(response)?
            .read_to_end(&mut bytes)
            .map_err(ShellError::render)?;
        let (text, _, _) = charset.decode(&bytes);

        let mut rendered = String::new();
        for document in Deserializer::from_str(&text).into_iter::<Value>() {
            let document = document.map_err(ShellError::render)?;
            for line in pretty_lines(&document)? {
                rendered.push_str(&line);
                rendered.push('\n');
            }
        }

        self.out
            .write_all(rendered.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(ShellError::render)
    }
}

/// Paginated formatter
pub struct InteractiveFormatter<W: Write, P: PageControl> {
    out: W,
    pager: P,
    page_size: usize,
}

impl<W: Write, P: PageControl> InteractiveFormatter<W, P> {
    pub fn new(out: W, pager: P, page_size: usize) -> Self {
        Self {
            out,
            pager,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Ask the pager whether to keep going; a broken pager ends pagination
    fn continue_paging(&mut self) -> Result<bool, ShellError> {
        self.out.flush().map_err(ShellError::render)?;
        match self.pager.wait_for_continue() {
            Ok(PageSignal::Continue) => Ok(true),
            Ok(PageSignal::Stop) => {
                tracing::debug!("Pagination stopped by user");
                Ok(false)
            }
            Err(e) => {
                tracing::warn!("Pager failed, stopping output: {}", e);
                Ok(false)
            }
        }
    }
}

impl<W: Write, P: PageControl> JsonFormatter for InteractiveFormatter<W, P> {
    fn format_json(
        &mut self,
        response: &mut ResponseStream,
        verbose: bool,
    ) -> Result<(), ShellError> {
        let mut pending: VecDeque<String> = VecDeque::new();
        if verbose {
            pending.extend(metadata_lines(response));
        }

        let charset = response.charset();
        let body = take_body(response)?;
        // Only UTF-8 bodies can be decoded while streaming; anything else is decoded up front
        let reader: Box<dyn Read + '_> = if charset == UTF_8 {
            Box::new(BufReader::new(body))
        } else {
            let mut bytes = Vec::new();
            body.read_to_end(&mut bytes).map_err(ShellError::render)?;
            let (text, _, _) = charset.decode(&bytes);
            Box::new(Cursor::new(text.into_owned().into_bytes()))
        };

        let mut documents = Deserializer::from_reader(reader).into_iter::<Value>();
        let mut exhausted = false;
        let mut lines_on_page = 0;

        loop {
            while pending.is_empty() && !exhausted {
                match documents.next() {
                    Some(Ok(document)) => pending.extend(pretty_lines(&document)?),
                    Some(Err(e)) => {
                        self.out.flush().map_err(ShellError::render)?;
                        return Err(ShellError::render(e));
                    }
                    None => exhausted = true,
                }
            }

            let Some(line) = pending.pop_front() else {
                break;
            };

            if lines_on_page == self.page_size {
                if !self.continue_paging()? {
                    return Ok(());
                }
                lines_on_page = 0;
            }

            writeln!(self.out, "{line}").map_err(ShellError::render)?;
            lines_on_page += 1;
        }

        self.out.flush().map_err(ShellError::render)
    }
}
