//! Device status client.
//!
//! Both remote operations hit the same endpoint; the probe keeps the whole
//! status so a successful authentication can seed the displayed count.

use async_trait::async_trait;
use tracing::debug;
use urlencoding::encode;

use super::DeviceStatus;
use crate::error::StatusError;
use crate::traits::{Headers, HttpClient, StatusClient};

/// Status client over any [`HttpClient`].
#[derive(Debug, Clone)]
pub struct DeviceStatusClient<H> {
    http: H,
    base_url: String,
}

impl<H: HttpClient> DeviceStatusClient<H> {
    /// Create a client for `base_url`; a trailing `/` is ignored.
    pub fn new(http: H, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn desktop_url(&self, token: &str) -> String {
        format!("{}/api/v1/device/{}/desktop", self.base_url, encode(token))
    }

    async fn fetch_status(&self, token: &str) -> Result<DeviceStatus, StatusError> {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        let response = self.http.get(&self.desktop_url(token), &headers).await?;

        if let Some(err) = StatusError::from_status(response.status, &response.text_lossy()) {
            debug!(status = response.status, "device status request rejected");
            return Err(err);
        }

        response
            .json::<DeviceStatus>()
            .map_err(|e| StatusError::Transient(format!("invalid status response: {}", e)))
    }
}

#[async_trait]
impl<H: HttpClient> StatusClient for DeviceStatusClient<H> {
    async fn probe_authentication(&self, token: &str) -> Result<DeviceStatus, StatusError> {
        self.fetch_status(token).await
    }

    async fn failing_policy_count(&self, token: &str) -> Result<u32, StatusError> {
        self.fetch_status(token)
            .await
            .map(|status| status.failing_policies)
    }

    fn device_url(&self, token: &str) -> String {
        format!("{}/device/{}", self.base_url, encode(token))
    }

    fn transparency_url(&self, token: &str) -> String {
        format!("{}/api/v1/device/{}/transparency", self.base_url, encode(token))
    }
}
