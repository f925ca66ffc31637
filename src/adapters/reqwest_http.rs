//! Reqwest-based HTTP client adapter.
//!
//! Production implementation of [`HttpClient`]. Transport options (root CA
//! override, certificate verification bypass, timeout) come from
//! [`TransportConfig`].

use async_trait::async_trait;
use tracing::warn;

use crate::config::TransportConfig;
use crate::error::ConfigError;
use crate::traits::{Headers, HttpClient, HttpError, Response};

const USER_AGENT: &str = concat!("device-tray/", env!("CARGO_PKG_VERSION"));

/// [`HttpClient`] backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Client with reqwest defaults and no timeout.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Build a client honoring the configured transport options.
    pub fn from_transport(transport: &TransportConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder()
            .timeout(transport.request_timeout)
            .user_agent(USER_AGENT);

        if let Some(path) = &transport.root_ca {
            let pem = std::fs::read(path).map_err(|e| ConfigError::RootCa {
                path: path.clone(),
                message: e.to_string(),
            })?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| ConfigError::RootCa {
                path: path.clone(),
                message: e.to_string(),
            })?;
            builder = builder.add_root_certificate(cert);
        }

        if transport.insecure_skip_verify {
            warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// The request URL carries the device token, so it is stripped first.
fn transport_error(err: reqwest::Error) -> HttpError {
    let err = err.without_url();
    let message = err.to_string();
    if err.is_timeout() {
        HttpError::Timeout(message)
    } else if err.is_connect() {
        HttpError::ConnectionFailed(message)
    } else if err.is_builder() {
        HttpError::InvalidUrl(message)
    } else {
        HttpError::Other(message)
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        let request = headers
            .iter()
            .fold(self.client.get(url), |request, (name, value)| {
                request.header(name, value)
            });

        let reply = request.send().await.map_err(transport_error)?;
        let status = reply.status().as_u16();
        let body = reply.bytes().await.map_err(transport_error)?;

        Ok(Response::new(status, body))
    }
}
