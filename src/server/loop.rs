// Server loop module
// Accepts connections until the process exits

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Accept loop: every connection is handed to its own task.
///
/// Accept errors (e.g. file descriptor exhaustion) are logged and the loop
/// carries on.
pub async fn start_server_loop(listener: TcpListener, state: Arc<AppState>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
            Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
        }
    }
}
