use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use freshd::config::{AppState, Config};
use freshd::server::signal::{start_signal_handler, SignalHandler};
use freshd::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::bind_listener(addr)?;
    let state = Arc::new(AppState::new(cfg)?);

    logger::log_server_start(&addr, &state.config, &state.root);

    let signals = Arc::new(SignalHandler::new());
    start_signal_handler(Arc::clone(&signals));

    let active_connections = Arc::new(AtomicUsize::new(0));
    server::run_accept_loop(
        listener,
        state,
        active_connections,
        Arc::clone(&signals.shutdown),
    )
    .await
}
