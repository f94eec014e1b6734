//! HTTP response building module
//!
//! Every response the fixture sends is `text/plain`.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

pub const CONTENT_TYPE: &str = "text/plain";

/// Body of the set-response-time acknowledgement
pub const OK_BODY: &str = "Ok\n";

/// Body of the fallback response
pub const NOT_FOUND_BODY: &str = "Nope\n";

/// Build a `text/plain` response with the given status and body
pub fn build_text_response(status: StatusCode, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    let body = body.into();
    Response::builder()
        .status(status)
        .header("Content-type", CONTENT_TYPE)
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            let mut resp = Response::new(Full::new(body));
            *resp.status_mut() = status;
            resp
        })
}

/// Build 200 `Ok` acknowledgement
pub fn build_ok_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::OK, OK_BODY)
}

/// Build 404 `Nope` response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_ok_response() {
        let resp = build_ok_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "text/plain");
        assert_eq!(body_string(resp).await, "Ok\n");
    }

    #[tokio::test]
    async fn test_404_response() {
        let resp = build_404_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()["content-type"], "text/plain");
        assert_eq!(body_string(resp).await, "Nope\n");
    }
}
