//! Mock implementations for testing.
//!
//! Test doubles for every trait abstraction, enabling tests without
//! network, file system or tray access.

pub mod browser;
pub mod display;
pub mod http;
pub mod reporter;
pub mod status;
pub mod token;

pub use browser::MockBrowser;
pub use display::{DisplayEvent, RecordingSurface};
pub use http::MockHttpClient;
pub use reporter::RecordingReporter;
pub use status::MockStatusClient;
pub use token::MockTokenSource;
