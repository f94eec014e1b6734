// Server loop module
// Accepts connections until the shutdown future resolves

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config;
use crate::logger;

/// Accept connections until `shutdown` resolves, then release the listener.
///
/// `shutdown` yields the name of whatever stopped the server. Connections
/// already being served are left to finish on their own tasks.
pub async fn run<F>(listener: TcpListener, state: Arc<config::AppState>, shutdown: F)
where
    F: Future<Output = &'static str>,
{
    let active_connections = Arc::new(AtomicUsize::new(0));
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            reason = &mut shutdown => {
                logger::log_shutdown(reason, active_connections.load(Ordering::SeqCst));
                break;
            }
        }
    }

    drop(listener);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppState, Config};
    use crate::metrics::COUNTER_METRIC;
    use crate::server::create_listener;
    use std::net::SocketAddr;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;
    use tokio::task::JoinHandle;

    struct TestServer {
        addr: SocketAddr,
        stop: oneshot::Sender<()>,
        handle: JoinHandle<()>,
    }

    async fn start_server() -> TestServer {
        let mut cfg = Config::from_env(Vec::<(String, String)>::new()).unwrap();
        cfg.logging.access_log = false;
        let state = Arc::new(AppState::new(&cfg));

        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop, stopped) = oneshot::channel::<()>();

        let handle = tokio::spawn(run(listener, state, async move {
            let _ = stopped.await;
            "test"
        }));

        TestServer { addr, stop, handle }
    }

    /// Send one request with `Connection: close` and return (status, head, body)
    async fn send(addr: SocketAddr, method: &str, target: &str) -> (u16, String, String) {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!(
            "{method} {target} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"
        );
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut raw = Vec::new();
        tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut raw))
            .await
            .expect("response timed out")
            .unwrap();

        let text = String::from_utf8(raw).unwrap();
        let (head, body) = text.split_once("\r\n\r\n").unwrap();
        let status = head.split_whitespace().nth(1).unwrap().parse().unwrap();
        (status, head.to_string(), body.to_string())
    }

    async fn get(addr: SocketAddr, target: &str) -> (u16, String) {
        let (status, head, body) = send(addr, "GET", target).await;
        assert!(
            head.to_ascii_lowercase().contains("content-type: text/plain"),
            "missing content type in {head:?}"
        );
        (status, body)
    }

    #[tokio::test]
    async fn test_metrics_over_tcp_before_set() {
        let server = start_server().await;

        let (status, body) = get(server.addr, "/metrics").await;
        assert_eq!(status, 200);
        assert_eq!(body, COUNTER_METRIC);

        let _ = server.stop.send(());
        server.handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_set_and_read_back_over_tcp() {
        let server = start_server().await;

        let (status, body) = get(server.addr, "/set-response-time/5").await;
        assert_eq!((status, body.as_str()), (200, "Ok\n"));
        let (status, body) = get(server.addr, "/set-response-time/42").await;
        assert_eq!((status, body.as_str()), (200, "Ok\n"));

        let (status, body) = get(server.addr, "/metrics").await;
        assert_eq!(status, 200);
        assert!(body.starts_with(COUNTER_METRIC));
        assert!(body.contains("# TYPE http_response_time_ms gauge\n"));
        assert!(body.ends_with("http_response_time_ms 42\n"));

        let (_, slashed) = get(server.addr, "/metrics/").await;
        assert_eq!(body, slashed);

        let _ = server.stop.send(());
        server.handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_fallback_over_tcp() {
        let server = start_server().await;

        for target in ["/", "/set-response-time/", "/set-response-time/abc", "/favicon.ico"] {
            let (status, body) = get(server.addr, target).await;
            assert_eq!(status, 404, "{target}");
            assert_eq!(body, "Nope\n", "{target}");
        }

        let (status, _, body) = send(server.addr, "POST", "/metrics").await;
        assert_eq!(status, 404);
        assert_eq!(body, "Nope\n");

        let _ = server.stop.send(());
        server.handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_idle_connection_does_not_block_others() {
        let server = start_server().await;

        // Connected but silent
        let _idle = TcpStream::connect(server.addr).await.unwrap();

        let (status, _) = get(server.addr, "/metrics").await;
        assert_eq!(status, 200);

        let _ = server.stop.send(());
        server.handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_releases_listener() {
        let server = start_server().await;
        let addr = server.addr;

        let _ = server.stop.send(());
        tokio::time::timeout(Duration::from_secs(5), server.handle)
            .await
            .expect("server did not stop")
            .unwrap();

        let err = TcpStream::connect(addr).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::ConnectionRefused);
    }
}
