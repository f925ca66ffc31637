//! Browser that records opened URLs.

use std::sync::{Arc, Mutex};

use crate::traits::Browser;

#[derive(Debug, Clone, Default)]
pub struct MockBrowser {
    opened: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MockBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// A browser whose every `open` fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Browser for MockBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        if self.fail {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no browser available",
            ));
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
