//! Static file serving module
//!
//! Resolves request paths against the document root and builds file,
//! directory and error responses.

use std::io;
use std::path::{Component, Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::range::RangeOutcome;
use crate::http::{self, cache, mime, range};
use crate::logger;

/// Serve the filesystem object the request path points at.
///
/// The traversal safety property lives here: the sanitized path is joined
/// onto the canonical root, canonicalized, and required to still be under
/// the root. Anything that fails that check is reported as absent.
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let Some(relative) = sanitize_request_path(ctx.path) else {
        logger::log_warning(&format!("Rejected request path: {}", ctx.path));
        return http::build_404_response();
    };

    let requested = state.root.join(relative);
    let resolved = match fs::canonicalize(&requested).await {
        Ok(p) => p,
        Err(e) => return error_response(&requested, &e),
    };
    if !resolved.starts_with(&state.root) {
        logger::log_warning(&format!(
            "Path escapes document root: {} -> {}",
            ctx.path,
            resolved.display()
        ));
        return http::build_404_response();
    }

    let meta = match fs::metadata(&resolved).await {
        Ok(m) => m,
        Err(e) => return error_response(&resolved, &e),
    };

    if meta.is_dir() {
        serve_directory(ctx, state, &resolved).await
    } else {
        serve_file(ctx, &resolved, &meta).await
    }
}

/// Serve a directory: redirect to the slash form, probe index files, then
/// fall back to a generated listing
async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    dir: &Path,
) -> Response<Full<Bytes>> {
    // Directory URLs are canonical only with a trailing slash; relative
    // links inside a listing break without it
    if !ctx.path.ends_with('/') {
        let location = match ctx.query {
            Some(q) => format!("{}/?{q}", ctx.path),
            None => format!("{}/", ctx.path),
        };
        return http::build_redirect_response(&location);
    }

    for index in &state.config.http.index_files {
        let candidate = dir.join(index);
        if let Ok(meta) = fs::metadata(&candidate).await {
            if meta.is_file() {
                return serve_file(ctx, &candidate, &meta).await;
            }
        }
    }

    if !state.config.http.autoindex {
        return http::build_403_response();
    }

    match listing::render_directory(ctx.path, dir).await {
        Ok(html) => http::response::build_html_response(html, ctx.is_head),
        Err(e) => error_response(dir, &e),
    }
}

/// Serve a regular file, honoring If-Modified-Since and Range
async fn serve_file(
    ctx: &RequestContext<'_>,
    path: &Path,
    meta: &std::fs::Metadata,
) -> Response<Full<Bytes>> {
    let mtime = meta.modified().ok();
    let last_modified = mtime.map(cache::format_http_date);

    if cache::not_modified_since(ctx.if_modified_since.as_deref(), mtime) {
        return http::build_304_response(last_modified.as_deref());
    }

    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) => return error_response(path, &e),
    };

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    let content_type = mime::from_extension(extension.as_deref());

    match range::resolve_range(ctx.range.as_deref(), content.len()) {
        RangeOutcome::Partial(r) => http::response::build_partial_response(
            &content[r.start..=r.end],
            content_type,
            last_modified.as_deref(),
            r.start,
            r.end,
            content.len(),
            ctx.is_head,
        ),
        RangeOutcome::Unsatisfiable => http::build_416_response(content.len()),
        RangeOutcome::Full => http::response::build_file_response(
            &content,
            content_type,
            last_modified.as_deref(),
            ctx.is_head,
        ),
    }
}

/// Map a filesystem error onto the response taxonomy:
/// absent -> 404, unreadable -> 403, anything else -> 500
fn error_response(path: &Path, err: &io::Error) -> Response<Full<Bytes>> {
    match err.kind() {
        io::ErrorKind::NotFound => http::build_404_response(),
        io::ErrorKind::PermissionDenied => {
            logger::log_warning(&format!("Access denied: {}", path.display()));
            http::build_403_response()
        }
        _ => {
            logger::log_error(&format!("I/O error on '{}': {}", path.display(), err));
            http::build_500_response()
        }
    }
}

/// Reduce a request path to a safe relative path under the root.
///
/// Returns None for paths carrying parent or rooted components; `.`
/// components are dropped. An empty result addresses the root itself.
fn sanitize_request_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim_start_matches('/');
    let mut clean = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_plain_paths() {
        assert_eq!(
            sanitize_request_path("/index.html"),
            Some(PathBuf::from("index.html"))
        );
        assert_eq!(
            sanitize_request_path("/a/b/c.txt"),
            Some(PathBuf::from("a/b/c.txt"))
        );
        assert_eq!(sanitize_request_path("/"), Some(PathBuf::new()));
    }

    #[test]
    fn test_sanitize_drops_cur_dir() {
        assert_eq!(
            sanitize_request_path("/./a/./b"),
            Some(PathBuf::from("a/b"))
        );
    }

    #[test]
    fn test_sanitize_rejects_parent_components() {
        assert_eq!(sanitize_request_path("/../etc/passwd"), None);
        assert_eq!(sanitize_request_path("/a/../../b"), None);
        assert_eq!(sanitize_request_path("/a/.."), None);
    }

    #[test]
    fn test_error_response_mapping() {
        let path = Path::new("/tmp/x");

        let not_found = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert_eq!(error_response(path, &not_found).status(), 404);

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "no");
        assert_eq!(error_response(path, &denied).status(), 403);

        let other = io::Error::other("disk on fire");
        assert_eq!(error_response(path, &other).status(), 500);
    }
}
