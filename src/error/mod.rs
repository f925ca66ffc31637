//! Error types for the device tray agent.
//!
//! - [`ErrorKind`] is the classification the reconciler acts on.
//! - [`TokenError`] covers the token file.
//! - [`StatusError`] covers the remote status service.
//! - [`ConfigError`] covers startup configuration.
//! - [`ActionError`] covers menu item actions.
//! - [`ReconcileError`] is what the loops hand to an
//!   [`ErrorReporter`](crate::traits::ErrorReporter).
//!
//! | Kind | Source | Reconciler reaction |
//! |------|--------|---------------------|
//! | Io | token file | log, retry next tick |
//! | NotYetAvailable | token cache | log, retry next tick |
//! | Unauthenticated | remote | start a new authentication episode |
//! | MissingEntitlement | remote | authenticated, count suppressed |
//! | Transient | remote | log, keep last good value |

mod action;
mod config;
mod kind;
mod status;
mod token;

pub use action::ActionError;
pub use config::ConfigError;
pub use kind::ErrorKind;
pub use status::StatusError;
pub use token::TokenError;

use thiserror::Error;

/// Any error observed by a reconciler loop.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Status(#[from] StatusError),
}

impl ReconcileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReconcileError::Token(err) => err.kind(),
            ReconcileError::Status(err) => err.kind(),
        }
    }
}
