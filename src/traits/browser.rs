//! Browser launcher trait.

/// Opens a URL in the user's browser.
pub trait Browser: Send + Sync {
    fn open(&self, url: &str) -> std::io::Result<()>;
}
