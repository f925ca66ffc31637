//! Error kind classification for the reconciler.
//!
//! Every error the reconciler can observe maps onto one of these kinds.
//! The kind decides what the loops do next: retry on cadence, start a new
//! authentication episode, or treat the outcome as a degraded success.

use std::fmt;

/// High-level classification of reconciler errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Token file could not be read or stat'ed.
    /// Recovered locally and retried on the next tick.
    Io,

    /// No token has ever been read successfully.
    NotYetAvailable,

    /// The remote service rejected the token.
    /// Triggers a new authentication episode.
    Unauthenticated,

    /// Token is valid but the policy-status feature is not licensed.
    /// Treated as an authenticated outcome, not a failure.
    MissingEntitlement,

    /// Network or service failure presumed recoverable by retry.
    Transient,
}

impl ErrorKind {
    /// Returns true if the loop should simply retry on its own cadence.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorKind::Io | ErrorKind::NotYetAvailable | ErrorKind::Transient
        )
    }

    /// Returns a short label suitable for structured log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Io => "io",
            ErrorKind::NotYetAvailable => "not_yet_available",
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::MissingEntitlement => "missing_entitlement",
            ErrorKind::Transient => "transient",
        }
    }

    /// Returns a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorKind::Io => "Device token file unreadable",
            ErrorKind::NotYetAvailable => "Device token not loaded yet",
            ErrorKind::Unauthenticated => "Device token rejected",
            ErrorKind::MissingEntitlement => "Policy status not licensed",
            ErrorKind::Transient => "Service temporarily unreachable",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_retryable() {
        assert!(ErrorKind::Io.is_retryable());
        assert!(ErrorKind::NotYetAvailable.is_retryable());
        assert!(ErrorKind::Transient.is_retryable());
        assert!(!ErrorKind::Unauthenticated.is_retryable());
        assert!(!ErrorKind::MissingEntitlement.is_retryable());
    }

    #[test]
    fn test_kind_as_str() {
        assert_eq!(ErrorKind::Io.as_str(), "io");
        assert_eq!(ErrorKind::NotYetAvailable.as_str(), "not_yet_available");
        assert_eq!(ErrorKind::Unauthenticated.as_str(), "unauthenticated");
        assert_eq!(ErrorKind::MissingEntitlement.as_str(), "missing_entitlement");
        assert_eq!(ErrorKind::Transient.as_str(), "transient");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(format!("{}", ErrorKind::Transient), "transient");
        assert_eq!(format!("{}", ErrorKind::Unauthenticated), "unauthenticated");
    }

    #[test]
    fn test_kind_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ErrorKind::Io);
        set.insert(ErrorKind::Transient);
        set.insert(ErrorKind::Io);

        assert_eq!(set.len(), 2);
    }
}
