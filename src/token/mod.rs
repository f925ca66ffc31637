//! Device token storage.
//!
//! [`FileTokenStore`] is the production [`TokenSource`](crate::traits::TokenSource):
//! it reads the token file, caches the last good value and detects
//! rotation by comparing modification times.

mod store;
mod types;

pub use store::FileTokenStore;
pub use types::DeviceToken;
