//! Error reporting collaborator.

use std::fmt;

use crate::error::ReconcileError;

/// Which loop observed an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopKind {
    Startup,
    Authentication,
    PolicyPoll,
    TokenWatch,
}

impl LoopKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoopKind::Startup => "startup",
            LoopKind::Authentication => "authentication",
            LoopKind::PolicyPoll => "policy_poll",
            LoopKind::TokenWatch => "token_watch",
        }
    }
}

impl fmt::Display for LoopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives every error the reconciler swallows.
///
/// Errors are never propagated to a caller; this is the only channel
/// through which they leave the reconciler.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, source: LoopKind, error: &ReconcileError);
}
