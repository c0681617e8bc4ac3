//! Request handler module
//!
//! Routing dispatch, static file serving, and directory listing generation.

pub mod listing;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
