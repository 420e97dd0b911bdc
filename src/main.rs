use std::sync::Arc;

mod config;
mod error;
mod handler;
mod http;
mod logger;
mod render;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    // Single-threaded, event-driven dispatch: one current-thread runtime,
    // no worker pool.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_listener(addr)?;

    // All handler collaborators live in AppState; nothing is process-global.
    let state = Arc::new(config::AppState::new(&cfg)?);

    logger::log_server_start(&addr);

    // spawn_local keeps every connection task on this thread.
    let local = tokio::task::LocalSet::new();
    local.run_until(server::accept_loop(listener, state)).await
}
