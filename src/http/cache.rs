//! Cache control module
//!
//! Owns the one header this server exists to set, plus RFC 7231 date
//! handling for conditional requests.

use std::time::SystemTime;

use chrono::{DateTime, NaiveDateTime, Utc};
use hyper::header::{HeaderValue, CACHE_CONTROL};
use hyper::Response;

/// Cache-Control value stamped on every response
pub const NO_CACHE_DIRECTIVES: &str = "no-cache, no-store, must-revalidate";

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Disable client-side caching on a response.
///
/// This is the header finalization step: it runs after status and body are
/// determined and before the response is handed to the connection, on every
/// response regardless of status code. `insert` replaces any Cache-Control
/// a builder might have set, so the outgoing value is always exactly
/// [`NO_CACHE_DIRECTIVES`]. Infallible: the value is a static, known-valid
/// header string.
pub fn disable_caching<B>(response: &mut Response<B>) {
    response.headers_mut().insert(
        CACHE_CONTROL,
        HeaderValue::from_static(NO_CACHE_DIRECTIVES),
    );
}

/// Format a filesystem timestamp as an RFC 7231 HTTP date
///
/// # Examples
/// ```
/// use std::time::{Duration, UNIX_EPOCH};
/// use freshd::http::cache::format_http_date;
/// let t = UNIX_EPOCH + Duration::from_secs(784_111_777);
/// assert_eq!(format_http_date(t), "Sun, 06 Nov 1994 08:49:37 GMT");
/// ```
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format(HTTP_DATE_FORMAT)
        .to_string()
}

/// Parse an RFC 7231 HTTP date (IMF-fixdate only, the format we emit)
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), HTTP_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Evaluate an If-Modified-Since header against a file's mtime.
///
/// Returns true when the client's copy is still current (respond 304).
/// Comparison is at second precision, matching what the formatted
/// Last-Modified header can express. Unparseable headers and missing
/// mtimes fail open to a full response.
pub fn not_modified_since(if_modified_since: Option<&str>, mtime: Option<SystemTime>) -> bool {
    let (Some(header), Some(mtime)) = (if_modified_since, mtime) else {
        return false;
    };
    let Some(since) = parse_http_date(header) else {
        return false;
    };
    DateTime::<Utc>::from(mtime).timestamp() <= since.timestamp()
}
