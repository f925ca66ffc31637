//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let client = MockStatusClient::new();
//! client.accept("tok-A", 3);
//! let harness = Harness::new(MockTokenSource::with_token("tok-A"), client, Intervals::default());
//! let handle = harness.reconciler.start();
//! ```

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;
use std::time::Duration;

use device_tray::display::LabelStyle;
use device_tray::reconciler::{Intervals, Reconciler};

/// A reconciler wired to recording test doubles.
///
/// The doubles share state with the copies the reconciler holds, so tests
/// can script and inspect them while the loops run.
pub struct Harness {
    pub tokens: MockTokenSource,
    pub client: MockStatusClient,
    pub surface: RecordingSurface,
    pub reporter: RecordingReporter,
    pub browser: MockBrowser,
    pub reconciler: Reconciler,
}

impl Harness {
    pub fn new(tokens: MockTokenSource, client: MockStatusClient, intervals: Intervals) -> Self {
        let surface = RecordingSurface::new();
        let reporter = RecordingReporter::new();
        let browser = MockBrowser::new();

        let reconciler = Reconciler::builder(
            Arc::new(tokens.clone()),
            Arc::new(client.clone()),
            Arc::new(surface.clone()),
        )
        .with_intervals(intervals)
        .with_reporter(Arc::new(reporter.clone()))
        .with_browser(Arc::new(browser.clone()))
        .with_label_style(LabelStyle::Emoji)
        .build()
        .expect("test intervals are valid");

        Self {
            tokens,
            client,
            surface,
            reporter,
            browser,
            reconciler,
        }
    }

    /// Current menu label.
    pub fn label(&self) -> String {
        self.surface.label().unwrap_or_default()
    }
}

/// Intervals in whole seconds.
#[allow(dead_code)]
pub fn intervals(auth_retry: u64, policy_poll: u64, token_watch: u64, timeout: u64) -> Intervals {
    Intervals {
        auth_retry: Duration::from_secs(auth_retry),
        policy_poll: Duration::from_secs(policy_poll),
        token_watch: Duration::from_secs(token_watch),
        request_timeout: Duration::from_secs(timeout),
    }
}

/// Let the paused clock run forward by `millis`.
pub async fn advance_ms(millis: u64) {
    tokio::time::sleep(Duration::from_millis(millis)).await;
}
