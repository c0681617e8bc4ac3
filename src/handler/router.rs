//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, dispatch to
//! the file server, and the cache-control finalization step every response
//! passes through.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Version};

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{self, cache};
use crate::logger;
use crate::logger::AccessLogEntry;

/// Request context encapsulating what file serving needs from a request
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
    pub range: Option<String>,
}

/// Main entry point for HTTP request handling.
///
/// Every response the file-serving logic produces, error statuses
/// included, leaves through the single [`cache::disable_caching`] call
/// below, so no response reaches the wire without the no-cache header.
/// The body type is generic because it is never read: this server only
/// interprets request lines and headers.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let mut response = process_request(&req, &state).await;

    // Header finalization point: after status and body are fixed, before
    // hyper writes anything
    cache::disable_caching(&mut response);

    if state.config.logging.access_log {
        let entry = access_entry(&req, &response, peer_addr, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Validate the request and dispatch it to the file server
async fn process_request<B>(req: &Request<B>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    if let Some(resp) = check_http_method(req.method()) {
        return resp;
    }

    if let Some(resp) = check_body_size(req, state.config.http.max_body_size) {
        return resp;
    }

    let ctx = RequestContext {
        path: req.uri().path(),
        query: req.uri().query(),
        is_head: *req.method() == Method::HEAD,
        if_modified_since: header_string(req, "if-modified-since"),
        range: header_string(req, "range"),
    };

    static_files::serve(&ctx, state).await
}

/// Check HTTP method and return an early response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length against the configured limit, returning 413
/// when exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Read a request header as an owned string, dropping non-UTF-8 values
fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Assemble the access-log record for a finished request
fn access_entry<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = content_length_of(response);
    entry.referer = header_string(req, "referer");
    entry.user_agent = header_string(req, "user-agent");
    entry.request_time_us =
        u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

/// Response size as reported by Content-Length (0 when absent)
fn content_length_of(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

/// Version string for log output
fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}
