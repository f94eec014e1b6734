//! Access log format module
//!
//! Common Log Format (CLF):
//! `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`

use chrono::Local;

/// Access log entry for one handled request
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client address, `-` when unknown
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request target as sent (path plus query)
    pub target: String,
    /// HTTP version (1.0, 1.1)
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(remote_addr: Option<std::net::SocketAddr>, method: String, target: String) -> Self {
        Self {
            remote_addr: remote_addr.map_or_else(|| "-".to_string(), |a| a.ip().to_string()),
            time: Local::now(),
            method,
            target,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
        }
    }

    pub fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {} HTTP/{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.target,
            self.http_version,
            self.status,
            self.body_bytes,
        )
    }
}

/// Map a hyper version to the digits used in the request line
pub fn version_digits(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
