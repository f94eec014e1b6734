// Configuration module entry point
// Resolves the listening port from the environment and holds runtime state

mod state;
mod types;

use std::net::SocketAddr;

use crate::logger;

// Re-export public types
pub use state::AppState;
pub use types::Config;

/// Port used when `PORT` is absent or not a valid TCP port
pub const DEFAULT_PORT: u16 = 8000;

/// Environment variable selecting the listening port
pub const PORT_ENV: &str = "PORT";

impl Config {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::from_env(std::env::vars())
    }

    /// Build configuration from an explicit set of environment variables.
    ///
    /// Only `PORT` is consulted; every other setting keeps its default.
    pub fn from_env<I>(vars: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let raw_port = vars
            .into_iter()
            .find_map(|(key, value)| (key == PORT_ENV).then_some(value));

        let port = match raw_port.as_deref() {
            None => DEFAULT_PORT,
            Some(raw) => parse_port(raw).unwrap_or_else(|| {
                logger::log_port_fallback(raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
        };

        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("logging.access_log", true)?
            .set_override("server.port", i64::from(port))?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Parse a `PORT` value, accepting only positive integers that fit a TCP port
pub fn parse_port(raw: &str) -> Option<u16> {
    match raw.trim().parse::<u16>() {
        Ok(0) | Err(_) => None,
        Ok(port) => Some(port),
    }
}
