//! Dual-mode server entry point.
//!
//! # Responsibility
//! - Serve the HTTP API and the local console menu from one process.
//! - Route both modes through a single store worker.
//!
//! # Invariants
//! - Leaving the console stops the listener, drains open connections, then
//!   joins the store worker so the database connection is closed cleanly.

use log::info;
use medstore_core::db::open_db;
use medstore_core::{core_version, init_logging, spawn_store_worker, Menu, StoreHandle};
use medstore_server::{serve_with_shutdown, ServerConfig};
use std::io;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

const LOCAL_LIST_BANNER: &str = "Fetching all data from the server...";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_defaults()?;
    init_logging(config.log_level, &config.log_dir).map_err(anyhow::Error::msg)?;

    let conn = open_db(&config.db_path)?;
    let (store, worker) = spawn_store_worker(conn)?;

    let listener = TcpListener::bind(config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(
        "event=server_start module=server status=ok addr={} db_path={} version={}",
        local_addr,
        config.db_path.display(),
        core_version()
    );
    println!("Server is listening on {local_addr}");

    let (stop_server, stop_signal) = oneshot::channel::<()>();
    let mut server = tokio::spawn(serve_with_shutdown(listener, store.clone(), async move {
        let _ = stop_signal.await;
    }));

    // The console blocks on stdin, so it lives on a plain thread the runtime
    // never waits for at shutdown.
    let (console_done, console_exit) = oneshot::channel();
    std::thread::Builder::new()
        .name("medstore-console".to_string())
        .spawn(move || {
            let _ = console_done.send(run_local_console(store));
        })?;

    tokio::select! {
        served = &mut server => return Ok(served??),
        exited = console_exit => exited??,
    }

    // The console thread has dropped its handle; the router holds the rest.
    let _ = stop_server.send(());
    server.await??;
    tokio::task::spawn_blocking(move || worker.join()).await??;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

fn run_local_console(store: StoreHandle) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    Menu::new(store)
        .list_banner(LOCAL_LIST_BANNER)
        .run(&mut input, &mut output)
}
