//! Device Tray - session and policy status reconciler for a managed device
//!
//! This library exposes modules for use by the binary and integration tests.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod reconciler;
pub mod status;
pub mod token;
pub mod traits;

pub use config::AgentConfig;
pub use error::{ErrorKind, ReconcileError};
pub use reconciler::{Intervals, Reconciler, ReconcilerHandle, ReconciliationState};
