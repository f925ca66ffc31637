//! Mock implementations for test fixtures.
//!
//! Re-exports the in-crate test doubles and adds wiremock helpers for the
//! device status endpoint.

pub use device_tray::adapters::mock::{
    DisplayEvent, MockBrowser, MockStatusClient, MockTokenSource, RecordingReporter,
    RecordingSurface,
};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path of the device status endpoint for `token`.
pub fn desktop_path(token: &str) -> String {
    format!("/api/v1/device/{}/desktop", token)
}

/// Respond to the status endpoint of `token` with `template`.
pub async fn mount_status(server: &MockServer, token: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(desktop_path(token)))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Accept `token` and report `failing` policies.
#[allow(dead_code)]
pub async fn mount_accepted(server: &MockServer, token: &str, failing: u32) {
    mount_status(
        server,
        token,
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({ "failing_policies_count": failing })),
    )
    .await;
}
