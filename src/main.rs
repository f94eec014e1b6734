use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod metrics;
mod routing;
mod server;

fn main() {
    if let Err(e) = run() {
        logger::log_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;

    let state = Arc::new(config::AppState::new(&cfg));

    logger::log_server_start(&listener.local_addr()?);

    server::run(listener, state, server::signal::wait_for_shutdown()).await;
    Ok(())
}
