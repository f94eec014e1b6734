//! Metrics exposition module
//!
//! Renders the text exposition served on `/metrics`.

/// Counter block, always present
pub const COUNTER_METRIC: &str = "\
# HELP example_app_cnt Pod counter metric.
# TYPE example_app_cnt gauge
example_app_cnt 1
";

/// Render the metrics body.
///
/// The latency block is appended only when a response time has been set;
/// its value is written exactly as it was stored.
pub fn render(response_time: Option<&str>) -> String {
    let mut body = String::from(COUNTER_METRIC);

    if let Some(value) = response_time {
        body.push_str("# HELP http_response_time_ms Fake latency metric.\n");
        body.push_str("# TYPE http_response_time_ms gauge\n");
        body.push_str(&format!("http_response_time_ms {value}\n"));
    }

    body
}
