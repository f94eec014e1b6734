//! Route matching module
//!
//! Classifies a request target into one of the fixture's routes.

/// Exact target of the metrics route (after trailing slashes are removed)
pub const METRICS_PATH: &str = "/metrics";

/// Prefix of the route that sets the reported response time
pub const SET_RESPONSE_TIME_PREFIX: &str = "/set-response-time/";

/// Result of matching a request target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// Render the metrics exposition
    Metrics,
    /// Store the captured digit string as the new response time
    SetResponseTime(&'a str),
    /// Anything else
    NotFound,
}

/// Match a request target (path plus optional query) against the routes in order
pub fn match_route(target: &str) -> Route<'_> {
    if is_metrics(target) {
        return Route::Metrics;
    }

    if let Some(value) = match_set_response_time(target) {
        return Route::SetResponseTime(value);
    }

    Route::NotFound
}

/// Metrics matches exactly once every trailing slash is stripped
fn is_metrics(target: &str) -> bool {
    target.trim_end_matches('/') == METRICS_PATH
}

/// Capture the digits after the set prefix.
///
/// Trailing slashes are ignored like for metrics; anything else after the
/// digits, including a query string, rejects the match.
fn match_set_response_time(target: &str) -> Option<&str> {
    let value = target
        .trim_end_matches('/')
        .strip_prefix(SET_RESPONSE_TIME_PREFIX)?;

    (!value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())).then_some(value)
}
