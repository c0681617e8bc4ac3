//! Access log format module
//!
//! Supports the usual formats:
//! - `combined` (Apache/Nginx combined format)
//! - `common` (Common Log Format)
//! - `json` (structured, one object per line)
//! - custom patterns with `$variable` substitution

use chrono::Local;

/// Access log entry containing all request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method
    pub method: String,
    /// Request URI path
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    /// HTTP version (1.0, 1.1, 2)
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
    /// Referer header
    pub referer: Option<String>,
    /// User-Agent header
    pub user_agent: Option<String>,
    /// Request processing time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry with the current timestamp
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            referer: None,
            user_agent: None,
            request_time_us: 0,
        }
    }

    /// Format the entry according to the configured format name
    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => self.format_combined(),
            "common" => self.format_common(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    /// Request URI with query string reattached
    fn request_uri(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{q}", self.path),
            None => self.path.clone(),
        }
    }

    /// Full request line: `METHOD /path HTTP/version`
    fn request_line(&self) -> String {
        format!("{} {} HTTP/{}", self.method, self.request_uri(), self.http_version)
    }

    /// Common Log Format:
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    /// Combined format: common plus referer and user-agent
    fn format_combined(&self) -> String {
        format!(
            "{} \"{}\" \"{}\"",
            self.format_common(),
            self.referer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    /// JSON structured format; hand-built to keep serde out of the hot path
    fn format_json(&self) -> String {
        format!(
            r#"{{"remote_addr":"{}","time":"{}","method":"{}","path":"{}","query":{},"http_version":"{}","status":{},"body_bytes":{},"referer":{},"user_agent":{},"request_time_us":{}}}"#,
            escape_json(&self.remote_addr),
            self.time.to_rfc3339(),
            escape_json(&self.method),
            escape_json(&self.path),
            json_string_or_null(self.query.as_deref()),
            escape_json(&self.http_version),
            self.status,
            self.body_bytes,
            json_string_or_null(self.referer.as_deref()),
            json_string_or_null(self.user_agent.as_deref()),
            self.request_time_us,
        )
    }

    /// Custom format with `$variable` substitution.
    ///
    /// Replacement order is longest-variable-first so that `$request_time`
    /// is not clobbered by `$request`.
    fn format_custom(&self, pattern: &str) -> String {
        #[allow(clippy::cast_precision_loss)]
        let request_time_s = self.request_time_us as f64 / 1_000_000.0;

        let substitutions = [
            ("$time_iso8601", self.time.to_rfc3339()),
            (
                "$time_local",
                self.time.format("%d/%b/%Y:%H:%M:%S %z").to_string(),
            ),
            ("$remote_addr", self.remote_addr.clone()),
            ("$request_method", self.method.clone()),
            ("$request_time", format!("{request_time_s:.3}")),
            ("$request_uri", self.request_uri()),
            ("$request", self.request_line()),
            ("$status", self.status.to_string()),
            ("$body_bytes_sent", self.body_bytes.to_string()),
            (
                "$http_referer",
                self.referer.clone().unwrap_or_else(|| "-".to_string()),
            ),
            (
                "$http_user_agent",
                self.user_agent.clone().unwrap_or_else(|| "-".to_string()),
            ),
        ];

        let mut result = pattern.to_string();
        for (variable, value) in &substitutions {
            result = result.replace(variable, value);
        }
        result
    }
}

/// Render an optional string as a JSON string or `null`
fn json_string_or_null(value: Option<&str>) -> String {
    value.map_or_else(
        || "null".to_string(),
        |v| format!("\"{}\"", escape_json(v)),
    )
}

/// Escape special characters for a JSON string
fn escape_json(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "203.0.113.9".to_string(),
            "GET".to_string(),
            "/assets/app.css".to_string(),
        );
        entry.query = Some("v=3".to_string());
        entry.status = 200;
        entry.body_bytes = 512;
        entry.referer = Some("http://example.com/".to_string());
        entry.user_agent = Some("curl/8.0".to_string());
        entry.request_time_us = 3600;
        entry
    }

    #[test]
    fn test_format_common() {
        let log = sample_entry().format("common");
        assert!(log.starts_with("203.0.113.9 - - ["));
        assert!(log.contains("\"GET /assets/app.css?v=3 HTTP/1.1\""));
        assert!(log.ends_with("200 512"));
        assert!(!log.contains("curl/8.0"));
    }

    #[test]
    fn test_format_combined() {
        let log = sample_entry().format("combined");
        assert!(log.contains("\"GET /assets/app.css?v=3 HTTP/1.1\" 200 512"));
        assert!(log.contains("\"http://example.com/\""));
        assert!(log.contains("\"curl/8.0\""));
    }

    #[test]
    fn test_format_combined_dashes_for_missing_headers() {
        let mut entry = sample_entry();
        entry.referer = None;
        entry.user_agent = None;
        let log = entry.format("combined");
        assert!(log.ends_with("\"-\" \"-\""));
    }

    #[test]
    fn test_format_json() {
        let log = sample_entry().format("json");
        assert!(log.contains(r#""remote_addr":"203.0.113.9""#));
        assert!(log.contains(r#""query":"v=3""#));
        assert!(log.contains(r#""status":200"#));
        assert!(log.contains(r#""request_time_us":3600"#));
    }

    #[test]
    fn test_format_json_null_fields() {
        let mut entry = sample_entry();
        entry.query = None;
        entry.referer = None;
        let log = entry.format("json");
        assert!(log.contains(r#""query":null"#));
        assert!(log.contains(r#""referer":null"#));
    }

    #[test]
    fn test_format_custom() {
        let log = sample_entry().format("$remote_addr $status $request_time");
        assert!(log.starts_with("203.0.113.9 200 "));
        // 3600us is 0.004 seconds at three decimals
        assert!(log.ends_with("0.004"));
    }

    #[test]
    fn test_format_custom_request_vs_request_time() {
        let log = sample_entry().format("$request|$request_time");
        assert_eq!(log, "GET /assets/app.css?v=3 HTTP/1.1|0.004");
    }

    #[test]
    fn test_escape_json() {
        assert_eq!(escape_json("a\"b"), "a\\\"b");
        assert_eq!(escape_json("line\nbreak"), "line\\nbreak");
        assert_eq!(escape_json("back\\slash"), "back\\\\slash");
    }
}
