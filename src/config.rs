//! Configuration constants and utilities for elasticshell
//!
//! Startup defaults for the session plus the locations the shell reads
//! from the environment.

/// Host used when none is given on the command line
pub const DEFAULT_HOST: &str = "http://localhost";

/// Port used when none is given on the command line
pub const DEFAULT_PORT: u16 = 9200;

/// Default history file path for the interactive shell
pub const DEFAULT_HISTORY_PATH: &str = "/tmp/elasticshell.history";

/// Environment variable name for overriding the history file path
pub const HISTORY_PATH_ENV_VAR: &str = "ELASTICSHELL_HISTORY_PATH";

/// Environment variable holding the tracing filter directives
pub const LOG_LEVEL_ENV_VAR: &str = "ELASTICSHELL_LOG_LEVEL";

/// Page height used when the terminal size cannot be determined
pub const DEFAULT_PAGE_LINES: usize = 20;

/// Maximum number of entries kept in the history file
pub const HISTORY_CAPACITY: usize = 1000;

/// Prompt shown before every input line
pub const PROMPT: &str = "ElasticShell> ";

/// Get the history file path, checking environment variable first, then falling back to default
pub fn get_history_path() -> String {
    let raw = std::env::var_os(HISTORY_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_HISTORY_PATH.to_string());
    shellexpand::tilde(&raw).into_owned()
}

/// Number of rendered lines per page for a terminal of `rows` rows.
///
/// One row is kept free for the continuation prompt.
pub fn page_lines_for_terminal(rows: Option<u16>) -> usize {
    match rows {
        Some(rows) if rows > 1 => usize::from(rows - 1),
        _ => DEFAULT_PAGE_LINES,
    }
}
