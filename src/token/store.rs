//! File-backed device token store.
//!
//! The token file is written by a separate enrollment agent; this store
//! only reads and stats it. The last good value is cached so callers keep
//! a usable token while the file is missing or being rewritten.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use async_trait::async_trait;
use tracing::debug;

use super::DeviceToken;
use crate::error::TokenError;
use crate::traits::TokenSource;

/// Reads the device token from a fixed path and caches the last good value.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    cache: RwLock<Option<DeviceToken>>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    async fn mod_time(&self) -> Result<SystemTime, TokenError> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| TokenError::io(&self.path, e))?;
        metadata
            .modified()
            .map_err(|e| TokenError::io(&self.path, e))
    }
}

#[async_trait]
impl TokenSource for FileTokenStore {
    async fn read(&self) -> Result<DeviceToken, TokenError> {
        // Stat before reading: a write landing in between leaves an older
        // mtime next to newer content, which only causes a spurious recheck.
        let mod_time = self.mod_time().await?;
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| TokenError::io(&self.path, e))?;

        let token = DeviceToken::from_contents(&contents, mod_time).ok_or_else(|| {
            TokenError::Empty {
                path: self.path.clone(),
            }
        })?;

        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        debug!(path = %self.path.display(), "device token read from disk");
        Ok(token)
    }

    fn cached(&self) -> Result<DeviceToken, TokenError> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(TokenError::NotYetAvailable)
    }

    async fn has_changed(&self) -> Result<bool, TokenError> {
        let current = self.mod_time().await?;
        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(DeviceToken::source_mod_time);
        Ok(cached != Some(current))
    }
}
