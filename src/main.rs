//! # ElasticShell Main Entry Point
//!
//! With a method on the command line, sends that one request and prints
//! the response. Otherwise starts the interactive shell.

use anyhow::Result;
use elasticshell::cmd_args::CommandLineArgs;
use elasticshell::config::{self, DEFAULT_PAGE_LINES, LOG_LEVEL_ENV_VAR};
use elasticshell::repl::command::{validate_host, validate_port};
use elasticshell::repl::io::{TerminalLineSource, TerminalPager};
use elasticshell::repl::services::HttpTransport;
use elasticshell::{parse_line, AppController, ParsedCommand, RequestDispatcher, SessionConfig};
use std::io;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

fn main() -> Result<()> {
    init_tracing_subscriber()?;

    let cmd_args = CommandLineArgs::parse();
    let session = session_from_args(&cmd_args)?;
    let transport = HttpTransport::new()?;

    match cmd_args.request_line() {
        Some(line) => run_once(session, transport, &line),
        None => run_shell(session, transport, &cmd_args),
    }
}

/// Seed the session from command line flags, validated like `set` commands
fn session_from_args(cmd_args: &CommandLineArgs) -> Result<SessionConfig> {
    let host = validate_host(cmd_args.host())?;
    let port = validate_port(&cmd_args.port().to_string())?;

    Ok(SessionConfig::new()
        .with_host(host)
        .with_port(port)
        .with_credentials(cmd_args.user().cloned(), cmd_args.pass().cloned())
        .with_verbose(cmd_args.verbose()))
}

/// Send a single request and render it in batch mode
fn run_once(session: SessionConfig, transport: HttpTransport, line: &str) -> Result<()> {
    tracing::debug!("Running one-shot request '{}'", line);
    let request = match parse_line(line)? {
        Some(ParsedCommand::Request(request)) => request,
        _ => anyhow::bail!("'{line}' is not a request"),
    };

    let mut dispatcher = RequestDispatcher::for_session(
        transport,
        &session,
        io::stdout(),
        TerminalPager::new(),
        DEFAULT_PAGE_LINES,
    );
    dispatcher.dispatch(&session, &request)?;
    Ok(())
}

fn run_shell(
    session: SessionConfig,
    transport: HttpTransport,
    cmd_args: &CommandLineArgs,
) -> Result<()> {
    let page_lines = cmd_args.page_lines().unwrap_or_else(|| {
        let rows = crossterm::terminal::size().ok().map(|(_, rows)| rows);
        config::page_lines_for_terminal(rows)
    });
    tracing::debug!("Starting shell against {} ({} lines per page)", session.base_url(), page_lines);

    let line_source = TerminalLineSource::new(&config::get_history_path())?;
    let mut app = AppController::with_io(
        session,
        transport,
        line_source,
        io::stdout(),
        io::stdout(),
        TerminalPager::new(),
        page_lines,
    );
    app.run()
}

fn init_tracing_subscriber() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_env(LOG_LEVEL_ENV_VAR)
                .add_directive("reqwest=warn".parse()?)
                .add_directive("hyper=warn".parse()?)
                .add_directive("hyper_util=warn".parse()?)
                .add_directive("rustls=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))
}
