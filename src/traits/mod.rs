//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`TokenSource`] - device token storage
//! - [`StatusClient`] - remote authentication and policy status
//! - [`HttpClient`] - HTTP GET transport under the status client
//! - [`DisplaySurface`] - tray menu outbound events
//! - [`ErrorReporter`] - sink for swallowed loop errors
//! - [`Browser`] - opening menu item pages

pub mod browser;
pub mod display;
pub mod http;
pub mod reporter;
pub mod status;
pub mod token;

pub use browser::Browser;
pub use display::DisplaySurface;
pub use http::{Headers, HttpClient, HttpError, Response};
pub use reporter::{ErrorReporter, LoopKind};
pub use status::StatusClient;
pub use token::TokenSource;
