//! In-memory token source for testing.
//!
//! Simulates the token file: each write bumps a version that stands in for
//! the file's modification time.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use crate::error::TokenError;
use crate::token::DeviceToken;
use crate::traits::TokenSource;

const MOCK_PATH: &str = "/mock/device/identifier";

#[derive(Debug, Default)]
struct MockFile {
    contents: Option<String>,
    version: u64,
    cache: Option<DeviceToken>,
    read_version: Option<u64>,
    reads: usize,
}

/// Mock token source with controllable file contents.
#[derive(Debug, Clone, Default)]
pub struct MockTokenSource {
    file: Arc<Mutex<MockFile>>,
}

impl MockTokenSource {
    /// Token source whose file does not exist yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Token source whose file holds `token`.
    pub fn with_token(token: &str) -> Self {
        let source = Self::new();
        source.set_token(token);
        source
    }

    /// Rewrite the file (simulates rotation by the enrollment agent).
    pub fn set_token(&self, token: &str) {
        let mut file = self.file.lock().unwrap();
        file.contents = Some(token.to_string());
        file.version += 1;
    }

    /// Touch the file without changing its contents.
    pub fn touch(&self) {
        self.file.lock().unwrap().version += 1;
    }

    /// Delete the file.
    pub fn remove(&self) {
        let mut file = self.file.lock().unwrap();
        file.contents = None;
        file.version += 1;
    }

    /// Number of `read` calls, successful or not.
    pub fn read_count(&self) -> usize {
        self.file.lock().unwrap().reads
    }

    fn mod_time(version: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(version)
    }

    fn not_found() -> TokenError {
        TokenError::Io {
            path: PathBuf::from(MOCK_PATH),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        }
    }
}

#[async_trait]
impl TokenSource for MockTokenSource {
    async fn read(&self) -> Result<DeviceToken, TokenError> {
        let mut file = self.file.lock().unwrap();
        file.reads += 1;

        let contents = file.contents.clone().ok_or_else(Self::not_found)?;
        let token = DeviceToken::from_contents(&contents, Self::mod_time(file.version))
            .ok_or_else(|| TokenError::Empty {
                path: PathBuf::from(MOCK_PATH),
            })?;

        file.cache = Some(token.clone());
        file.read_version = Some(file.version);
        Ok(token)
    }

    fn cached(&self) -> Result<DeviceToken, TokenError> {
        self.file
            .lock()
            .unwrap()
            .cache
            .clone()
            .ok_or(TokenError::NotYetAvailable)
    }

    async fn has_changed(&self) -> Result<bool, TokenError> {
        let file = self.file.lock().unwrap();
        if file.contents.is_none() {
            return Err(Self::not_found());
        }
        Ok(file.read_version != Some(file.version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file() {
        let source = MockTokenSource::new();
        assert!(matches!(source.read().await, Err(TokenError::Io { .. })));
        assert!(matches!(source.cached(), Err(TokenError::NotYetAvailable)));
        assert!(source.has_changed().await.is_err());
        assert_eq!(source.read_count(), 1);
    }

    #[tokio::test]
    async fn test_rotation_detected() {
        let source = MockTokenSource::with_token("tok-A");
        assert!(source.has_changed().await.unwrap());

        source.read().await.unwrap();
        assert!(!source.has_changed().await.unwrap());

        source.set_token("tok-B");
        assert!(source.has_changed().await.unwrap());
        assert_eq!(source.cached().unwrap().value(), "tok-A");

        source.read().await.unwrap();
        assert_eq!(source.cached().unwrap().value(), "tok-B");
    }

    #[tokio::test]
    async fn test_removed_file_keeps_cache() {
        let source = MockTokenSource::with_token("tok-A");
        source.read().await.unwrap();

        source.remove();
        assert!(source.read().await.is_err());
        assert_eq!(source.cached().unwrap().value(), "tok-A");
    }
}
