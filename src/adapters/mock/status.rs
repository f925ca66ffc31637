//! Scripted status client for testing.
//!
//! Outcomes are configured per token: a sticky default plus a queue of
//! one-shot outcomes consumed first. Unscripted tokens are rejected.
//! Calls are recorded when they start, so timed-out calls still count.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::StatusError;
use crate::status::DeviceStatus;
use crate::traits::StatusClient;

#[derive(Debug)]
struct Script<T> {
    defaults: HashMap<String, Result<T, StatusError>>,
    queued: HashMap<String, VecDeque<Result<T, StatusError>>>,
    calls: Vec<String>,
}

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self {
            defaults: HashMap::new(),
            queued: HashMap::new(),
            calls: Vec::new(),
        }
    }

    fn record(&mut self, token: &str) {
        self.calls.push(token.to_string());
    }

    fn next(&mut self, token: &str) -> Result<T, StatusError> {
        if let Some(outcome) = self.queued.get_mut(token).and_then(VecDeque::pop_front) {
            return outcome;
        }
        self.defaults
            .get(token)
            .cloned()
            .unwrap_or(Err(StatusError::Unauthenticated))
    }
}

/// Decrements the in-flight counter even when the call is cancelled.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Mock status client with per-token scripted outcomes.
#[derive(Debug, Clone)]
pub struct MockStatusClient {
    probes: Arc<Mutex<Script<DeviceStatus>>>,
    counts: Arc<Mutex<Script<u32>>>,
    latency: Duration,
    probes_in_flight: Arc<AtomicUsize>,
    max_probes_in_flight: Arc<AtomicUsize>,
}

impl MockStatusClient {
    pub fn new() -> Self {
        Self {
            probes: Arc::new(Mutex::new(Script::new())),
            counts: Arc::new(Mutex::new(Script::new())),
            latency: Duration::ZERO,
            probes_in_flight: Arc::new(AtomicUsize::new(0)),
            max_probes_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Every call sleeps for `latency` (on tokio's clock) before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Accept `token` for both operations, reporting `failing` policies.
    pub fn accept(&self, token: &str, failing: u32) {
        self.set_probe(token, Ok(DeviceStatus::new(failing)));
        self.set_count(token, Ok(failing));
    }

    pub fn set_probe(&self, token: &str, outcome: Result<DeviceStatus, StatusError>) {
        let mut script = self.probes.lock().unwrap();
        script.defaults.insert(token.to_string(), outcome);
    }

    pub fn push_probe(&self, token: &str, outcome: Result<DeviceStatus, StatusError>) {
        let mut script = self.probes.lock().unwrap();
        script
            .queued
            .entry(token.to_string())
            .or_default()
            .push_back(outcome);
    }

    pub fn set_count(&self, token: &str, outcome: Result<u32, StatusError>) {
        let mut script = self.counts.lock().unwrap();
        script.defaults.insert(token.to_string(), outcome);
    }

    pub fn push_count(&self, token: &str, outcome: Result<u32, StatusError>) {
        let mut script = self.counts.lock().unwrap();
        script
            .queued
            .entry(token.to_string())
            .or_default()
            .push_back(outcome);
    }

    /// Tokens passed to `probe_authentication`, in call order.
    pub fn probe_calls(&self) -> Vec<String> {
        self.probes.lock().unwrap().calls.clone()
    }

    /// Tokens passed to `failing_policy_count`, in call order.
    pub fn count_calls(&self) -> Vec<String> {
        self.counts.lock().unwrap().calls.clone()
    }

    /// Highest number of probes observed running at the same time.
    pub fn max_concurrent_probes(&self) -> usize {
        self.max_probes_in_flight.load(Ordering::SeqCst)
    }
}

impl Default for MockStatusClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusClient for MockStatusClient {
    async fn probe_authentication(&self, token: &str) -> Result<DeviceStatus, StatusError> {
        self.probes.lock().unwrap().record(token);
        let running = self.probes_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.probes_in_flight);
        self.max_probes_in_flight.fetch_max(running, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.probes.lock().unwrap().next(token)
    }

    async fn failing_policy_count(&self, token: &str) -> Result<u32, StatusError> {
        self.counts.lock().unwrap().record(token);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.counts.lock().unwrap().next(token)
    }

    fn device_url(&self, token: &str) -> String {
        format!("https://fleet.test/device/{}", token)
    }

    fn transparency_url(&self, token: &str) -> String {
        format!("https://fleet.test/api/v1/device/{}/transparency", token)
    }
}
