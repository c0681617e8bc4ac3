//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the request handler: cache-control
//! finalization, MIME detection, Range resolution, and response builders.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used items
pub use cache::disable_caching;
pub use range::resolve_range;
pub use response::{
    build_304_response, build_403_response, build_404_response, build_405_response,
    build_413_response, build_416_response, build_500_response, build_options_response,
    build_redirect_response,
};
