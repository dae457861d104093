//! Local static-file HTTP server for web and WebAssembly development.
//!
//! Serves a single root directory over HTTP/1.1. File types come from the
//! platform MIME table, except `.js` and `.wasm`, which are always sent as
//! `application/javascript` and `application/wasm`.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod root;
pub mod server;

#[cfg(test)]
mod test_util;

pub use error::{Error, Result};
