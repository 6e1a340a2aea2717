//! # Line Classification
//!
//! Turns one trimmed input line into a [`ParsedCommand`]. Lines starting
//! with `set` become admin commands that mutate the session; everything
//! else is handed to the request parser.
//!
//! ## Admin grammar
//!
//! ```text
//! set host <scheme://...>
//! set port <int>
//! set user <string>
//! set pass <string>
//! set verbose
//! ```
//!
//! Malformed `set` lines (wrong token count, unknown key) are ignored
//! without a message. Bad host and port values are reported and dropped.

use reqwest::Url;

use crate::repl::error::ShellError;
use crate::repl::utils::RequestParser;

/// A validated change to one field of the session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    Host(String),
    Port(u16),
    User(String),
    Pass(String),
    Verbose,
}

/// A request ready to be handed to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestCommand {
    pub method: String,
    pub url: String,
    pub body: String,
}

/// Result of classifying one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Admin(AdminCommand),
    Request(RequestCommand),
}

/// Classify a trimmed, non-empty line.
///
/// Returns `Ok(None)` for `set` lines that are silently ignored.
pub fn parse_line(line: &str) -> Result<Option<ParsedCommand>, ShellError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if tokens.first() == Some(&"set") {
        return parse_admin(&tokens).map(|admin| admin.map(ParsedCommand::Admin));
    }

    let parser = RequestParser::new(line)?;
    parser.validate()?;
    tracing::debug!(
        "Parsed request command: {} {} (body {} bytes)",
        parser.method(),
        parser.url(),
        parser.body().len()
    );

    Ok(Some(ParsedCommand::Request(RequestCommand {
        method: parser.method().to_string(),
        url: parser.url().to_string(),
        body: parser.body().to_string(),
    })))
}

fn parse_admin(tokens: &[&str]) -> Result<Option<AdminCommand>, ShellError> {
    match tokens {
        ["set", "verbose"] => Ok(Some(AdminCommand::Verbose)),
        ["set", key, value] => match *key {
            "host" => validate_host(value).map(|host| Some(AdminCommand::Host(host))),
            "port" => validate_port(value).map(|port| Some(AdminCommand::Port(port))),
            "user" => Ok(Some(AdminCommand::User(value.to_string()))),
            "pass" => Ok(Some(AdminCommand::Pass(value.to_string()))),
            _ => {
                tracing::debug!("Ignoring unknown admin key '{}'", key);
                Ok(None)
            }
        },
        _ => {
            tracing::debug!("Ignoring malformed admin command: {:?}", tokens);
            Ok(None)
        }
    }
}

/// Accept only `http://` or `https://` URLs that name a host and nothing else.
///
/// The port comes from `set port` and the path from each request, so a
/// host carrying either (or credentials, a query or a fragment) is refused.
pub fn validate_host(value: &str) -> Result<String, ShellError> {
    let url = match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => url,
        _ => {
            return Err(ShellError::validation(format!(
                "{value} does not contain a valid protocol scheme"
            )))
        }
    };

    // Url drops a default port such as `:80`, so compare against the
    // rebuilt origin rather than asking for `port()`
    let origin = format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default());
    let bare = value.trim_end_matches('/').eq_ignore_ascii_case(&origin);

    if bare {
        Ok(value.to_string())
    } else {
        Err(ShellError::validation(format!(
            "{value} must be a bare scheme and host; use set port for the port"
        )))
    }
}

pub fn validate_port(value: &str) -> Result<u16, ShellError> {
    match value.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ShellError::validation(format!("{value} is not a valid port"))),
    }
}
