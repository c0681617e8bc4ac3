//! freshd - static file server with client-side caching disabled
//!
//! Serves a document root over HTTP/1.x and stamps every response,
//! success or error, with `Cache-Control: no-cache, no-store,
//! must-revalidate` at the header finalization point.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
