// Application state module
// Process-wide read-only state shared across connections

use std::io;
use std::path::PathBuf;

use super::types::Config;

/// Application state
///
/// Constructed once at startup and shared via `Arc`. Nothing in here is
/// mutable after construction, so request handling never contends on it.
pub struct AppState {
    pub config: Config,
    /// Canonicalized document root; every served path must stay under it
    pub root: PathBuf,
}

impl AppState {
    /// Create the state object, resolving the configured document root.
    ///
    /// Fails when the root does not exist or cannot be canonicalized, which
    /// aborts startup rather than serving a dangling root.
    pub fn new(config: Config) -> io::Result<Self> {
        let root = std::fs::canonicalize(&config.server.root)?;
        Ok(Self { config, root })
    }
}
