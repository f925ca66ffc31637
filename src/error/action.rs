//! Menu action errors.

use thiserror::Error;

use super::{ErrorKind, TokenError};
use crate::display::MenuItem;

/// Failure to open a menu item's page.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("menu item '{0}' is disabled")]
    ItemDisabled(MenuItem),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("failed to open browser: {0}")]
    Browser(#[source] std::io::Error),
}

impl ActionError {
    /// Reconciler kind behind the failure. A disabled item is a menu-state
    /// refusal rather than a reconciler error, so it has none.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ActionError::ItemDisabled(_) => None,
            ActionError::Token(err) => Some(err.kind()),
            ActionError::Browser(_) => Some(ErrorKind::Io),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_error_display() {
        let err = ActionError::ItemDisabled(MenuItem::Transparency);
        assert_eq!(err.to_string(), "menu item 'transparency' is disabled");
        assert_eq!(err.kind(), None);
    }

    #[test]
    fn test_action_error_from_token() {
        let err: ActionError = TokenError::NotYetAvailable.into();
        assert_eq!(err.kind(), Some(ErrorKind::NotYetAvailable));

        let err = ActionError::Browser(std::io::Error::other("no display"));
        assert_eq!(err.kind(), Some(ErrorKind::Io));
    }
}
