use std::sync::Arc;

use uplink::config::{AppState, Config};
use uplink::storage::UploadSlot;
use uplink::{handler, logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    // Route bindings are fixed before the listener starts; a duplicate
    // binding aborts startup here, never at request time.
    let slot = UploadSlot::new(&cfg.upload.slot_path);
    let table = handler::default_routes(slot)?;

    let listener = server::create_reusable_listener(addr)?;
    let state = Arc::new(AppState::new(cfg, table));

    logger::log_server_start(&addr, &state.config);

    tokio::select! {
        res = server::serve(listener, state) => res,
        _ = tokio::signal::ctrl_c() => {
            logger::log_shutdown();
            Ok(())
        }
    }
}
