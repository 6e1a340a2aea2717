//! # Terminal I/O Implementations
//!
//! Production implementations of the line source (reedline) and the
//! pager (crossterm key events).

use super::{LineSource, PageControl, PageSignal, ReadOutcome};
use crate::config::{HISTORY_CAPACITY, PROMPT};
use crate::repl::utils::SUPPORTED_METHODS;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor, execute};
use reedline::{
    default_emacs_keybindings, ColumnarMenu, Completer, EditCommand, Emacs, FileBackedHistory,
    MenuBuilder, Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus,
    Reedline, ReedlineEvent, ReedlineMenu, Signal, Span, Suggestion,
};
use std::borrow::Cow;
use std::io;
use std::path::PathBuf;

/// Shown at every page boundary of interactive output
pub const MORE_PROMPT: &str = "-- More -- (Enter/Space: next page, q: stop)";

const COMPLETION_MENU: &str = "completion_menu";

/// Returned by the editor when Ctrl-C is pressed. reedline clears its
/// buffer before reporting `Signal::CtrlC`, so the key is rebound to a
/// host command that leaves the partial line in place.
const INTERRUPT_SENTINEL: &str = "\u{3}";

/// Words offered after `set`
const ADMIN_KEYS: [&str; 5] = ["host", "port", "user", "pass", "verbose"];

/// Line source backed by reedline with a file history and tab completion
pub struct TerminalLineSource {
    editor: Reedline,
    prompt: ShellPrompt,
}

impl TerminalLineSource {
    /// Create a line editor whose history lives at `history_path`
    pub fn new(history_path: &str) -> Result<Self> {
        tracing::debug!("Using history file '{}'", history_path);
        let history = Box::new(
            FileBackedHistory::with_file(HISTORY_CAPACITY, PathBuf::from(history_path))
                .map_err(|e| anyhow::anyhow!("Failed to create history: {e}"))?,
        );

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            reedline::KeyModifiers::NONE,
            reedline::KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );
        keybindings.add_binding(
            reedline::KeyModifiers::CONTROL,
            reedline::KeyCode::Char('c'),
            ReedlineEvent::ExecuteHostCommand(INTERRUPT_SENTINEL.to_string()),
        );

        let menu = Box::new(ColumnarMenu::default().with_name(COMPLETION_MENU));
        let editor = Reedline::create()
            .with_history(history)
            .with_completer(Box::new(ShellCompleter))
            .with_menu(ReedlineMenu::EngineCompleter(menu))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        Ok(Self {
            editor,
            prompt: ShellPrompt::new(PROMPT),
        })
    }

    /// Take whatever was typed before the interrupt and clear the editor
    fn interrupt(&mut self) -> ReadOutcome {
        let partial = self.editor.current_buffer_contents().to_string();
        if !partial.is_empty() {
            self.editor.run_edit_commands(&[EditCommand::Clear]);
            println!();
        }
        ReadOutcome::Interrupted { partial }
    }
}

impl LineSource for TerminalLineSource {
    fn read_line(&mut self) -> Result<ReadOutcome> {
        match self.editor.read_line(&self.prompt)? {
            Signal::Success(line) if line == INTERRUPT_SENTINEL => Ok(self.interrupt()),
            Signal::Success(line) => Ok(ReadOutcome::Line(line)),
            Signal::CtrlC => Ok(self.interrupt()),
            Signal::CtrlD => Ok(ReadOutcome::Eof),
        }
    }
}

/// Fixed-text prompt
pub struct ShellPrompt {
    prompt_str: String,
}

impl ShellPrompt {
    pub fn new(prompt: &str) -> Self {
        Self {
            prompt_str: prompt.to_string(),
        }
    }
}

impl Prompt for ShellPrompt {
    fn get_prompt_color(&self) -> Color {
        Color::Blue
    }

    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.prompt_str)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse-search: {}) ",
            prefix, history_search.term
        ))
    }
}

/// Tab completion for commands, methods and admin keys
pub struct ShellCompleter;

impl ShellCompleter {
    /// Candidates for the word ending at the cursor, with the word's start offset
    pub fn candidates(line_to_cursor: &str) -> (usize, Vec<String>) {
        let words: Vec<&str> = line_to_cursor.split_whitespace().collect();
        let completing_new_word =
            line_to_cursor.is_empty() || line_to_cursor.ends_with(char::is_whitespace);

        let (word_start, partial, word_index) = if completing_new_word {
            (line_to_cursor.len(), "", words.len())
        } else {
            let last = words.last().copied().unwrap_or("");
            (line_to_cursor.len() - last.len(), last, words.len() - 1)
        };

        let pool: Vec<&str> = match (word_index, words.first().copied()) {
            (0, _) => ["set", "exit", "quit"]
                .into_iter()
                .chain(SUPPORTED_METHODS)
                .collect(),
            (1, Some("set")) => ADMIN_KEYS.to_vec(),
            _ => Vec::new(),
        };

        let upper = partial.to_uppercase();
        let matches = pool
            .into_iter()
            .filter(|candidate| candidate.starts_with(partial) || candidate.starts_with(&upper))
            .map(str::to_string)
            .collect();

        (word_start, matches)
    }
}

impl Completer for ShellCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let line_to_cursor = line.get(..pos).unwrap_or(line);
        let (word_start, matches) = Self::candidates(line_to_cursor);
        let span = Span::new(word_start, pos);

        matches
            .into_iter()
            .map(|value| Suggestion {
                value,
                span,
                append_whitespace: true,
                ..Suggestion::default()
            })
            .collect()
    }
}

/// Pager that waits for a key press in raw mode
#[derive(Debug, Default)]
pub struct TerminalPager;

impl TerminalPager {
    pub fn new() -> Self {
        Self
    }

    fn read_signal() -> Result<PageSignal> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down | KeyCode::PageDown => {
                        return Ok(PageSignal::Continue)
                    }
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(PageSignal::Stop),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(PageSignal::Stop)
                    }
                    _ => {}
                }
            }
        }
    }
}

impl PageControl for TerminalPager {
    fn wait_for_continue(&mut self) -> Result<PageSignal> {
        let mut stdout = io::stdout();
        execute!(stdout, Print(MORE_PROMPT))?;

        terminal::enable_raw_mode()?;
        let signal = Self::read_signal();
        terminal::disable_raw_mode()?;

        execute!(stdout, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completer_should_offer_commands_for_first_word() {
        let (start, matches) = ShellCompleter::candidates("");
        assert_eq!(start, 0);
        assert!(matches.contains(&"set".to_string()));
        assert!(matches.contains(&"GET".to_string()));
        assert!(matches.contains(&"quit".to_string()));
    }

    #[test]
    fn completer_should_match_methods_case_insensitively() {
        let (start, matches) = ShellCompleter::candidates("po");
        assert_eq!(start, 0);
        assert_eq!(matches, vec!["POST".to_string()]);
    }

    #[test]
    fn completer_should_offer_admin_keys_after_set() {
        let (start, matches) = ShellCompleter::candidates("set p");
        assert_eq!(start, 4);
        assert_eq!(matches, vec!["port".to_string(), "pass".to_string()]);

        let (_, matches) = ShellCompleter::candidates("set ");
        assert_eq!(matches.len(), ADMIN_KEYS.len());
    }

    #[test]
    fn completer_should_treat_a_trailing_tab_as_a_word_break() {
        let (start, matches) = ShellCompleter::candidates("set\t");
        assert_eq!(start, 4);
        assert_eq!(matches.len(), ADMIN_KEYS.len());
    }

    #[test]
    fn completer_should_not_complete_request_paths() {
        let (_, matches) = ShellCompleter::candidates("GET /_c");
        assert!(matches.is_empty());
    }

    #[test]
    fn shell_prompt_should_render_configured_text() {
        let prompt = ShellPrompt::new(PROMPT);
        assert_eq!(prompt.render_prompt_left(), "ElasticShell> ");
        assert_eq!(prompt.render_prompt_right(), "");
        assert_eq!(prompt.get_prompt_color(), Color::Blue);
    }

    #[test]
    fn terminal_pager_can_be_created() {
        let _pager = TerminalPager::new();
    }
}
