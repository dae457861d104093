//! Static file serving module
//!
//! Resolves request paths under the root, handles directories (redirect,
//! index file, listing) and builds file responses.

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, date, path};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncReadExt;

/// Serve whatever the request path maps to under the root
pub async fn serve_path(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let translated = path::translate(&state.root, ctx.path);

    let metadata = match fs::metadata(&translated.fs_path).await {
        Ok(m) => m,
        Err(e) => return error_response(&translated.fs_path, &e),
    };

    if metadata.is_dir() {
        return serve_directory(ctx, state, &translated.fs_path).await;
    }

    // `/file.js/` names a directory that does not exist
    if translated.trailing_slash {
        return http::build_404_response();
    }

    serve_file(ctx, state, &translated.fs_path).await
}

/// Serve a directory: add the trailing slash, then index file, then listing
async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    dir: &Path,
) -> Response<Full<Bytes>> {
    if !ctx.path.ends_with('/') {
        // A leading `//` would make the Location protocol-relative
        let local = format!("/{}", ctx.path.trim_start_matches('/'));
        let location = match ctx.query {
            Some(q) => format!("{local}/?{q}"),
            None => format!("{local}/"),
        };
        return http::build_301_response(&location);
    }

    for index_file in &state.config.http.index_files {
        let index_path = dir.join(index_file);
        if fs::metadata(&index_path).await.is_ok_and(|m| m.is_file()) {
            return serve_file(ctx, state, &index_path).await;
        }
    }

    if !state.config.http.directory_listing {
        return http::build_404_response();
    }

    let display_path = path::percent_decode(ctx.path);
    match listing::render_directory(dir, &display_path).await {
        Ok(html) => http::build_html_response(html, ctx.is_head),
        Err(e) => error_response(dir, &e),
    }
}

/// Serve a regular file with its MIME type and `Last-Modified`
pub async fn serve_file(
    ctx: &RequestContext<'_>,
    state: &AppState,
    file_path: &Path,
) -> Response<Full<Bytes>> {
    let mut file = match fs::File::open(file_path).await {
        Ok(f) => f,
        Err(e) => return error_response(file_path, &e),
    };

    let metadata = match file.metadata().await {
        Ok(m) => m,
        Err(e) => return error_response(file_path, &e),
    };
    let modified = match metadata.modified() {
        Ok(t) => t,
        Err(e) => return error_response(file_path, &e),
    };
    let last_modified = date::format_http_date(modified);

    // If-None-Match takes precedence, and no ETags are issued
    if !ctx.has_if_none_match {
        if let Some(since) = ctx.if_modified_since.as_deref() {
            if date::not_modified_since(modified, since) {
                return http::build_304_response(&last_modified);
            }
        }
    }

    let content_type = state.mime.resolve(file_path);
    if ctx.is_head {
        return http::build_file_head_response(metadata.len(), content_type, &last_modified);
    }

    let mut content = Vec::new();
    if let Err(e) = file.read_to_end(&mut content).await {
        return error_response(file_path, &e);
    }

    http::build_file_response(Bytes::from(content), content_type, &last_modified)
}

/// Map a filesystem error to a status response
fn error_response(path: &Path, error: &io::Error) -> Response<Full<Bytes>> {
    match error.kind() {
        // Missing files are routine, no need to log them
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory | io::ErrorKind::InvalidInput => {
            http::build_404_response()
        }
        io::ErrorKind::PermissionDenied => {
            logger::log_warning(&format!("Permission denied: {}", path.display()));
            http::build_403_response()
        }
        _ => {
            logger::log_error(&format!("Failed to read '{}': {error}", path.display()));
            http::build_500_response()
        }
    }
}
