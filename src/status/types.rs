//! Wire types for the device status endpoint.

use serde::{Deserialize, Serialize};

/// Body of `GET /api/v1/device/{token}/desktop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceStatus {
    #[serde(rename = "failing_policies_count", default)]
    pub failing_policies: u32,
}

impl DeviceStatus {
    pub fn new(failing_policies: u32) -> Self {
        Self { failing_policies }
    }
}
