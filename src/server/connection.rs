// Connection handling module
// Serves a single accepted TCP connection on its own task

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::config;
use crate::handler;
use crate::logger;

/// Handle a single connection in a spawned task.
///
/// Failures stay inside the task: they are logged and never reach the
/// listener or the shared state.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address, passed through to the access log
/// * `state` - Shared application state
/// * `conn_counter` - Active connection counter, decremented when the task ends
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: &Arc<config::AppState>,
    conn_counter: &Arc<AtomicUsize>,
) {
    conn_counter.fetch_add(1, Ordering::SeqCst);

    let state = Arc::clone(state);
    let conn_counter = Arc::clone(conn_counter);

    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let mut builder = http1::Builder::new();
        builder.keep_alive(true).title_case_headers(true);

        let conn = builder.serve_connection(io, service_fn(move |req| {
            let state = Arc::clone(&state);
            async move { handler::handle_request(req, state, Some(peer_addr)).await }
        }));

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}
