//! Externally observable reconciliation state.

use std::fmt;

/// The composite state the reconciler publishes.
///
/// Exactly one variant is current at any instant. The reconciler is its
/// only writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconciliationState {
    /// Initial state, or the token was rejected.
    #[default]
    Unauthenticated,
    /// A probe is in flight and has not succeeded yet.
    Authenticating,
    /// The token is valid.
    ///
    /// `failure_count` is the most recent successfully fetched count, or
    /// `None` before any count is known. `entitled` is false when the policy
    /// feature is not licensed; the count is then never displayed.
    Authenticated {
        failure_count: Option<u32>,
        entitled: bool,
    },
}

impl ReconciliationState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, ReconciliationState::Authenticated { .. })
    }

    /// Count carried by an authenticated state.
    pub fn failure_count(&self) -> Option<u32> {
        match self {
            ReconciliationState::Authenticated { failure_count, .. } => *failure_count,
            _ => None,
        }
    }
}

impl fmt::Display for ReconciliationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconciliationState::Unauthenticated => f.write_str("unauthenticated"),
            ReconciliationState::Authenticating => f.write_str("authenticating"),
            ReconciliationState::Authenticated {
                failure_count: Some(count),
                entitled: true,
            } => write!(f, "authenticated ({} failing)", count),
            ReconciliationState::Authenticated { entitled: true, .. } => {
                f.write_str("authenticated")
            }
            ReconciliationState::Authenticated { entitled: false, .. } => {
                f.write_str("authenticated (not entitled)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unauthenticated() {
        assert_eq!(
            ReconciliationState::default(),
            ReconciliationState::Unauthenticated
        );
        assert!(!ReconciliationState::default().is_authenticated());
    }

    #[test]
    fn test_failure_count() {
        let state = ReconciliationState::Authenticated {
            failure_count: Some(4),
            entitled: true,
        };
        assert!(state.is_authenticated());
        assert_eq!(state.failure_count(), Some(4));
        assert_eq!(ReconciliationState::Authenticating.failure_count(), None);
    }

    #[test]
    fn test_display() {
        let state = ReconciliationState::Authenticated {
            failure_count: Some(2),
            entitled: true,
        };
        assert_eq!(state.to_string(), "authenticated (2 failing)");

        let state = ReconciliationState::Authenticated {
            failure_count: Some(2),
            entitled: false,
        };
        assert_eq!(state.to_string(), "authenticated (not entitled)");
    }
}
