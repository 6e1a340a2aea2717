//! Shared helpers for the integration tests

use std::sync::Once;

use elasticshell::config::LOG_LEVEL_ENV_VAR;
use elasticshell::SessionConfig;
use wiremock::MockServer;

static INIT: Once = Once::new();

/// Install a stderr subscriber once per test binary.
///
/// Level comes from ELASTICSHELL_LOG_LEVEL and defaults to error.
pub fn init_tracing() {
    INIT.call_once(|| {
        let log_level = std::env::var(LOG_LEVEL_ENV_VAR)
            .unwrap_or_else(|_| "error".to_string())
            .to_lowercase();

        let level = match log_level.as_str() {
            "trace" => tracing::Level::TRACE,
            "debug" => tracing::Level::DEBUG,
            "info" => tracing::Level::INFO,
            "warn" => tracing::Level::WARN,
            _ => tracing::Level::ERROR,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// A session pointed at the mock server
#[allow(dead_code)]
pub fn session_for(server: &MockServer) -> SessionConfig {
    let address = server.address();
    SessionConfig::new()
        .with_host(format!("http://{}", address.ip()))
        .with_port(address.port())
}
