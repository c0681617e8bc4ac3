//! HTTP response building module
//!
//! Builders for every status this server produces. None of them set
//! Cache-Control: that header is stamped centrally at finalization, so a
//! value written here would be overwritten anyway.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build 200 OK for a complete file
pub fn build_file_response(
    data: &[u8],
    content_type: &str,
    last_modified: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(data.to_owned())
    };

    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Accept-Ranges", "bytes");
    if let Some(stamp) = last_modified {
        builder = builder.header("Last-Modified", stamp);
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 206 Partial Content for a range of a file
pub fn build_partial_response(
    slice: &[u8],
    content_type: &str,
    last_modified: Option<&str>,
    start: usize,
    end: usize,
    total_size: usize,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = end - start + 1;
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(slice.to_owned())
    };

    let mut builder = Response::builder()
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Content-Range", format!("bytes {start}-{end}/{total_size}"))
        .header("Accept-Ranges", "bytes");
    if let Some(stamp) = last_modified {
        builder = builder.header("Last-Modified", stamp);
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("206", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build generic HTML response (directory listings)
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 301 redirect (directory URL missing its trailing slash)
pub fn build_redirect_response(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(301)
        .header("Location", location)
        .header("Content-Type", "text/plain")
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 304 Not Modified
pub fn build_304_response(last_modified: Option<&str>) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(304);
    if let Some(stamp) = last_modified {
        builder = builder.header("Last-Modified", stamp);
    }
    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("304", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 404 Not Found
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_plain_error(404, "404 Not Found")
}

/// Build 403 Forbidden
pub fn build_403_response() -> Response<Full<Bytes>> {
    build_plain_error(403, "403 Forbidden")
}

/// Build 500 Internal Server Error
pub fn build_500_response() -> Response<Full<Bytes>> {
    build_plain_error(500, "500 Internal Server Error")
}

/// Build 405 Method Not Allowed
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build 204 response for OPTIONS
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 413 Payload Too Large
pub fn build_413_response() -> Response<Full<Bytes>> {
    build_plain_error(413, "413 Payload Too Large")
}

/// Build 416 Range Not Satisfiable
pub fn build_416_response(file_size: usize) -> Response<Full<Bytes>> {
    Response::builder()
        .status(416)
        .header("Content-Type", "text/plain")
        .header("Content-Range", format!("bytes */{file_size}"))
        .body(Full::new(Bytes::from("Range Not Satisfiable")))
        .unwrap_or_else(|e| {
            log_build_error("416", &e);
            Response::new(Full::new(Bytes::from("Range Not Satisfiable")))
        })
}

/// Shared shape of the bodyless plain-text error responses
fn build_plain_error(status: u16, message: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .header("Content-Length", message.len())
        .body(Full::new(Bytes::from(message)))
        .unwrap_or_else(|e| {
            log_build_error(&status.to_string(), &e);
            Response::new(Full::new(Bytes::from(message)))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
