//! Remote status service errors.

use thiserror::Error;

use super::ErrorKind;
use crate::traits::HttpError;

/// Outcomes of a remote status call other than a plain success.
///
/// `MissingEntitlement` is not a failure from the reconciler's point of
/// view: the token is valid, only the policy count is unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("device token rejected by the server")]
    Unauthenticated,

    #[error("device is not entitled to policy status")]
    MissingEntitlement,

    #[error("status request failed: {0}")]
    Transient(String),
}

impl StatusError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatusError::Unauthenticated => ErrorKind::Unauthenticated,
            StatusError::MissingEntitlement => ErrorKind::MissingEntitlement,
            StatusError::Transient(_) => ErrorKind::Transient,
        }
    }

    /// Map an HTTP status code to a status outcome.
    ///
    /// Returns `None` for success codes.
    pub fn from_status(status: u16, body: &str) -> Option<Self> {
        match status {
            200..=299 => None,
            401 => Some(StatusError::Unauthenticated),
            402 => Some(StatusError::MissingEntitlement),
            _ => Some(StatusError::Transient(format!(
                "server returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            ))),
        }
    }
}

impl From<HttpError> for StatusError {
    fn from(err: HttpError) -> Self {
        StatusError::Transient(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_kinds() {
        assert_eq!(StatusError::Unauthenticated.kind(), ErrorKind::Unauthenticated);
        assert_eq!(
            StatusError::MissingEntitlement.kind(),
            ErrorKind::MissingEntitlement
        );
        assert_eq!(
            StatusError::Transient("boom".to_string()).kind(),
            ErrorKind::Transient
        );
    }

    #[test]
    fn test_from_status_codes() {
        assert_eq!(StatusError::from_status(200, ""), None);
        assert_eq!(StatusError::from_status(204, ""), None);
        assert_eq!(
            StatusError::from_status(401, ""),
            Some(StatusError::Unauthenticated)
        );
        assert_eq!(
            StatusError::from_status(402, ""),
            Some(StatusError::MissingEntitlement)
        );
        assert!(matches!(
            StatusError::from_status(500, "oops"),
            Some(StatusError::Transient(_))
        ));
        assert!(matches!(
            StatusError::from_status(403, ""),
            Some(StatusError::Transient(_))
        ));
    }

    #[test]
    fn test_from_status_truncates_body() {
        let body = "x".repeat(1000);
        match StatusError::from_status(503, &body) {
            Some(StatusError::Transient(message)) => assert!(message.len() < 300),
            other => panic!("expected transient, got {:?}", other),
        }
    }

    #[test]
    fn test_http_error_is_transient() {
        let err: StatusError = HttpError::Timeout("4s".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::Transient);
        assert!(err.to_string().contains("timeout"));
    }
}
