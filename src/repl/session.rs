//! # Session Configuration
//!
//! Connection parameters and display flags for the lifetime of the
//! shell. Admin commands mutate it one field at a time; the dispatcher
//! reads it on every call.

use crate::config::{DEFAULT_HOST, DEFAULT_PORT};
use crate::repl::command::AdminCommand;

/// Process-lifetime connection and display settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    host: String,
    port: u16,
    user: Option<String>,
    pass: Option<String>,
    verbose: bool,
    interactive: bool,
}

impl SessionConfig {
    /// Create a session pointing at the default endpoint
    pub fn new() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: None,
            pass: None,
            verbose: false,
            interactive: false,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_credentials(mut self, user: Option<String>, pass: Option<String>) -> Self {
        self.user = user;
        self.pass = pass;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Apply a validated admin command. Each command touches exactly one field.
    pub fn apply(&mut self, command: AdminCommand) {
        tracing::debug!("Applying admin command: {:?}", command);
        match command {
            AdminCommand::Host(host) => self.host = host,
            AdminCommand::Port(port) => self.port = port,
            AdminCommand::User(user) => self.user = Some(user),
            AdminCommand::Pass(pass) => self.pass = Some(pass),
            AdminCommand::Verbose => self.verbose = true,
        }
    }

    /// Switch to interactive (paginated) output. Called once at shell start.
    pub fn enable_interactive(&mut self) {
        self.interactive = true;
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn pass(&self) -> Option<&str> {
        self.pass.as_deref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn interactive(&self) -> bool {
        self.interactive
    }

    /// `host:port` with any trailing slash on the host removed
    pub fn base_url(&self) -> String {
        format!("{}:{}", self.host.trim_end_matches('/'), self.port)
    }

    /// Full URL for a request path
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url())
        } else {
            format!("{}/{path}", self.base_url())
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}
