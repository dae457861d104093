//! Program startup shared by both entry points
//!
//! Parses the command line, loads configuration, resolves the root with the
//! entry point's strategy, then runs the accept loop on a tokio runtime.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::Cli;
use crate::config::{AppState, Config};
use crate::root::{self, RootStrategy};
use crate::{logger, server};

/// Run the server until the process is killed
pub fn run(strategy: RootStrategy) -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = Config::load_from(cli.config.as_deref(), &cli.overrides())?;
    logger::init(&cfg)?;

    let root = strategy.resolve()?;
    root::ensure_servable(&root)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(serve(cfg, root))
}

async fn serve(cfg: Config, root: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_listener(addr)?;
    let state = Arc::new(AppState::new(cfg, root));

    logger::log_server_start(&addr, &state);
    server::start_server_loop(listener, state).await;
    Ok(())
}
