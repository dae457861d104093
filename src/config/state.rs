// Application state module
// Read-only state shared by every connection task

use hyper::header::HeaderValue;
use std::path::PathBuf;

use super::types::Config;
use crate::http::MimeTable;

/// Application state
///
/// Built once at startup and shared through `Arc`; nothing in it changes
/// while the server runs, so handlers read it without locking.
pub struct AppState {
    pub config: Config,
    /// Absolute root directory being served
    pub root: PathBuf,
    pub mime: MimeTable,
    /// Pre-validated `Server` header, absent if the configured name is not a valid header value
    pub server_header: Option<HeaderValue>,
}

impl AppState {
    pub fn new(config: Config, root: PathBuf) -> Self {
        let server_header = HeaderValue::from_str(&config.http.server_name).ok();
        Self {
            config,
            root,
            mime: MimeTable::new(),
            server_header,
        }
    }
}
