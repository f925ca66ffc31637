//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`TracingReporter`] - error reporter writing to the log
//! - [`LogSurface`] - display surface for the headless binary
//! - [`SystemBrowser`] - opens menu item pages
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for every trait:
//! - [`mock::MockHttpClient`] - configurable HTTP responses
//! - [`mock::MockTokenSource`] - in-memory token with rotation
//! - [`mock::MockStatusClient`] - scripted remote outcomes
//! - [`mock::RecordingSurface`] - records display events
//! - [`mock::RecordingReporter`] - records reported error kinds
//! - [`mock::MockBrowser`] - records opened URLs

pub mod browser;
pub mod log_surface;
pub mod mock;
pub mod reqwest_http;
pub mod tracing_reporter;

pub use browser::SystemBrowser;
pub use log_surface::LogSurface;
pub use mock::{
    MockBrowser, MockHttpClient, MockStatusClient, MockTokenSource, RecordingReporter,
    RecordingSurface,
};
pub use reqwest_http::ReqwestHttpClient;
pub use tracing_reporter::TracingReporter;
