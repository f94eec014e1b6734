// Signal handling module
//
// Supported signals:
// - SIGINT:  Shutdown (Ctrl+C)
// - SIGTERM: Shutdown (container stop)

use crate::logger;

/// Resolve once the process is asked to stop.
///
/// Returns the name of the signal that was received.
#[cfg(unix)]
pub async fn wait_for_shutdown() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let (mut sigint, mut sigterm) =
        match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
            (Ok(sigint), Ok(sigterm)) => (sigint, sigterm),
            (Err(e), _) | (_, Err(e)) => {
                logger::log_error(&format!("Failed to register signal handlers: {e}"));
                return wait_for_ctrl_c().await;
            }
        };

    tokio::select! {
        _ = sigint.recv() => "SIGINT",
        _ = sigterm.recv() => "SIGTERM",
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub async fn wait_for_shutdown() -> &'static str {
    wait_for_ctrl_c().await
}

async fn wait_for_ctrl_c() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
        // Without a signal source the fixture runs until killed
        std::future::pending::<()>().await;
    }
    "Ctrl+C"
}
