//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, context
//! extraction, dispatch to static file serving and access logging.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{IF_MODIFIED_SINCE, IF_NONE_MATCH, REFERER, SERVER, USER_AGENT};
use hyper::{HeaderMap, Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
    pub has_if_none_match: bool,
}

/// Main entry point for HTTP request handling
///
/// Never fails: every outcome, including filesystem errors, is a response.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _) = req.into_parts();
    let uri = &parts.uri;

    let mut response = match check_http_method(&parts.method) {
        Some(resp) => resp,
        None => {
            let ctx = RequestContext {
                path: uri.path(),
                query: uri.query(),
                is_head: parts.method == Method::HEAD,
                if_modified_since: header_string(&parts.headers, &IF_MODIFIED_SINCE),
                has_if_none_match: parts.headers.contains_key(IF_NONE_MATCH),
            };
            static_files::serve_path(&ctx, &state).await
        }
    };

    if let Some(server) = &state.server_header {
        response.headers_mut().insert(SERVER, server.clone());
    }

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            parts.method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = version_label(parts.version).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = body_len(&response);
        entry.referer = header_string(&parts.headers, &REFERER);
        entry.user_agent = header_string(&parts.headers, &USER_AGENT);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Return a response for anything but GET/HEAD
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        _ => Some(http::build_405_response()),
    }
}

fn header_string(headers: &HeaderMap, name: &hyper::header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn body_len(response: &Response<Full<Bytes>>) -> usize {
    response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
