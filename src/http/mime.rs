//! MIME type detection module
//!
//! Maps file extensions to a Content-Type for the response.

/// Get the Content-Type for a file extension
///
/// Unknown and missing extensions fall back to `application/octet-stream`,
/// which browsers treat as a download.
///
/// # Examples
/// ```
/// use freshd::http::mime::from_extension;
/// assert_eq!(from_extension(Some("html")), "text/html; charset=utf-8");
/// assert_eq!(from_extension(Some("png")), "image/png");
/// assert_eq!(from_extension(None), "application/octet-stream");
/// ```
pub fn from_extension(extension: Option<&str>) -> &'static str {
    match extension {
        // Markup and text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt" | "md" | "log") => "text/plain; charset=utf-8",
        Some("csv") => "text/csv",
        Some("xml") => "application/xml",

        // Scripts and data
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Audio and video
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("ogg" | "ogv") => "video/ogg",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Archives and documents
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("gz" | "gzip") => "application/gzip",
        Some("tar") => "application/x-tar",

        // Default
        _ => "application/octet-stream",
    }
}
