//! Device token source trait.

use async_trait::async_trait;

use crate::error::TokenError;
use crate::token::DeviceToken;

/// Source of the device identity token.
///
/// A failed [`read`](TokenSource::read) must leave the cached token
/// untouched, so [`cached`](TokenSource::cached) keeps returning the last
/// good value while a re-read is retried.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Re-read the backing store and refresh the cache.
    async fn read(&self) -> Result<DeviceToken, TokenError>;

    /// Last successfully read token, without I/O.
    ///
    /// Fails with [`TokenError::NotYetAvailable`] before the first good read.
    fn cached(&self) -> Result<DeviceToken, TokenError>;

    /// Whether the backing store was modified since the last good read.
    ///
    /// May report benign false positives, never false negatives.
    async fn has_changed(&self) -> Result<bool, TokenError>;
}
