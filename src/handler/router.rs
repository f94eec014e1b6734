//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method check, route matching,
//! dispatch and access logging.

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::metrics;
use crate::routing::{self, Route};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Main entry point for HTTP request handling.
///
/// The request body is never read, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |pq| pq.as_str());

    let response = route_request(method, target, &state).await;

    if state.access_log_enabled() {
        let mut entry = AccessLogEntry::new(remote_addr, method.to_string(), target.to_string());
        entry.http_version = logger::version_digits(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        logger::log_access(&entry);
    }

    Ok(response)
}

/// Dispatch a request target to its route.
///
/// Only GET is served; every other method gets the fallback response.
async fn route_request(method: &Method, target: &str, state: &AppState) -> Response<Full<Bytes>> {
    if method != Method::GET {
        return http::build_404_response();
    }

    match routing::match_route(target) {
        Route::Metrics => serve_metrics(state).await,
        Route::SetResponseTime(value) => {
            state.response_time.set(value).await;
            http::build_ok_response()
        }
        Route::NotFound => http::build_404_response(),
    }
}

async fn serve_metrics(state: &AppState) -> Response<Full<Bytes>> {
    let response_time = state.response_time.get().await;
    let body = metrics::render(response_time.as_deref());
    http::build_text_response(StatusCode::OK, body)
}
