//! Remote status client trait.

use async_trait::async_trait;

use crate::error::StatusError;
use crate::status::DeviceStatus;

/// The two remote operations the reconciler depends on.
///
/// Implementations never retry; cadence and retry belong to the reconciler.
#[async_trait]
pub trait StatusClient: Send + Sync {
    /// Validate `token` against the service.
    ///
    /// `Err(StatusError::MissingEntitlement)` still means the token is valid.
    async fn probe_authentication(&self, token: &str) -> Result<DeviceStatus, StatusError>;

    /// Number of failing policies for the device identified by `token`.
    async fn failing_policy_count(&self, token: &str) -> Result<u32, StatusError>;

    /// Page describing the device, opened from the "My device" item.
    fn device_url(&self, token: &str) -> String;

    /// Transparency page, opened from the "Transparency" item.
    fn transparency_url(&self, token: &str) -> String;
}
