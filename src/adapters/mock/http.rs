//! Scripted HTTP client.
//!
//! Routes map a URL prefix to a canned reply; the longest matching prefix
//! wins. Every request is recorded.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A request seen by [`MockHttpClient`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Headers,
}

/// Canned reply for a route.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Any server reply, whatever its status code
    Success(Response),
    /// Transport failure
    Error(HttpError),
}

#[derive(Debug, Default)]
struct Routes {
    by_prefix: Vec<(String, MockResponse)>,
    fallback: Option<MockResponse>,
    seen: Vec<RecordedRequest>,
}

impl Routes {
    fn resolve(&self, url: &str) -> Option<MockResponse> {
        self.by_prefix
            .iter()
            .filter(|(prefix, _)| url.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, reply)| reply.clone())
            .or_else(|| self.fallback.clone())
    }
}

/// Mock HTTP client. Clones share routes and recorded requests.
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    routes: Arc<Mutex<Routes>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `response` to every URL starting with `url`.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut routes = self.routes.lock().unwrap();
        routes.by_prefix.retain(|(prefix, _)| prefix != url);
        routes.by_prefix.push((url.to_string(), response));
    }

    /// Reply used when no route matches.
    pub fn set_default_response(&self, response: MockResponse) {
        self.routes.lock().unwrap().fallback = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.routes.lock().unwrap().seen.clone()
    }

    pub fn clear_requests(&self) {
        self.routes.lock().unwrap().seen.clear();
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        let mut routes = self.routes.lock().unwrap();
        routes.seen.push(RecordedRequest {
            method: "GET".to_string(),
            url: url.to_string(),
            headers: headers.clone(),
        });

        match routes.resolve(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("no mock route for {}", url))),
        }
    }
}
