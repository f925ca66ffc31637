//! Device token file errors.

use std::path::PathBuf;

use thiserror::Error;

use super::ErrorKind;

/// Errors raised while reading or stat'ing the device token file.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The file could not be read or stat'ed.
    #[error("failed to access device token at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but holds no token.
    #[error("device token file '{}' is empty", path.display())]
    Empty { path: PathBuf },

    /// No successful read has happened yet.
    #[error("device token has not been read yet")]
    NotYetAvailable,
}

impl TokenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenError::Io { .. } | TokenError::Empty { .. } => ErrorKind::Io,
            TokenError::NotYetAvailable => ErrorKind::NotYetAvailable,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TokenError::Io {
            path: path.into(),
            source,
        }
    }
}
