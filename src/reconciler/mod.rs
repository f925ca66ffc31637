//! Session and policy status reconciler.
//!
//! Three cooperating loops keep [`ReconciliationState`] in agreement with the
//! token on disk and the remote service:
//!
//! - the **authentication loop** runs once per episode, re-reading the token
//!   and probing the service until the token is accepted;
//! - the **policy loop** refreshes the failing policy count on a fixed
//!   cadence once an episode has succeeded;
//! - the **watch loop** notices token rotation and forces a new episode.
//!
//! Loops talk to each other only through the per-episode
//! [`EpisodeSignal`] and through one mutex-guarded shared state. Starting an
//! episode is serialized: a second trigger joins the episode already in
//! flight instead of starting another.
//!
//! Every error is handed to an [`ErrorReporter`] and retried on the loop's
//! own cadence. Nothing here ends the process.

mod auth_loop;
mod episode;
mod policy_loop;
mod state;
mod watch_loop;

pub use episode::EpisodeSignal;
pub use state::ReconciliationState;

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::adapters::{SystemBrowser, TracingReporter};
use crate::display::{DisplayState, LabelStyle, MenuItem};
use crate::error::{ActionError, ConfigError, ReconcileError, StatusError};
use crate::traits::{
    Browser, DisplaySurface, ErrorReporter, LoopKind, StatusClient, TokenSource,
};
use episode::Episode;

/// Default cadence of authentication attempts within an episode.
pub const DEFAULT_AUTH_RETRY: Duration = Duration::from_secs(5);

/// Default cadence of policy count refreshes.
pub const DEFAULT_POLICY_POLL: Duration = Duration::from_secs(5 * 60);

/// Default cadence of token rotation checks.
pub const DEFAULT_TOKEN_WATCH: Duration = Duration::from_secs(1);

/// Default bound on a single remote call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(4);

/// Longest accepted interval or timeout.
pub const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Loop cadences and the per-call timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervals {
    pub auth_retry: Duration,
    pub policy_poll: Duration,
    pub token_watch: Duration,
    /// Must be shorter than `auth_retry` and `policy_poll`.
    pub request_timeout: Duration,
}

impl Intervals {
    /// Check interval constraints.
    ///
    /// Every value must lie in `(0, MAX_INTERVAL]`, and a remote call must
    /// time out before the next tick of either loop that makes remote calls.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("auth retry", self.auth_retry),
            ("policy poll", self.policy_poll),
            ("token watch", self.token_watch),
            ("request timeout", self.request_timeout),
        ] {
            if value.is_zero() {
                return Err(ConfigError::ZeroInterval(name));
            }
            if value > MAX_INTERVAL {
                return Err(ConfigError::IntervalTooLong {
                    interval: name,
                    max: MAX_INTERVAL,
                });
            }
        }

        for (name, value) in [
            ("auth retry", self.auth_retry),
            ("policy poll", self.policy_poll),
        ] {
            if self.request_timeout >= value {
                return Err(ConfigError::TimeoutTooLong {
                    timeout: self.request_timeout,
                    interval: name,
                });
            }
        }
        Ok(())
    }
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            auth_retry: DEFAULT_AUTH_RETRY,
            policy_poll: DEFAULT_POLICY_POLL,
            token_watch: DEFAULT_TOKEN_WATCH,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Everything the loops mutate, behind one lock.
#[derive(Debug)]
struct Shared {
    state: ReconciliationState,
    display: DisplayState,
    /// Generation of the newest episode ever started.
    generation: u64,
    in_flight: Option<Episode>,
    auth_task: Option<JoinHandle<()>>,
    episodes_started: u64,
}

/// State and collaborators shared by the loops.
pub(crate) struct Inner {
    tokens: Arc<dyn TokenSource>,
    client: Arc<dyn StatusClient>,
    surface: Arc<dyn DisplaySurface>,
    reporter: Arc<dyn ErrorReporter>,
    browser: Arc<dyn Browser>,
    intervals: Intervals,
    label_style: LabelStyle,
    shared: Mutex<Shared>,
    state_tx: watch::Sender<ReconciliationState>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn report(&self, source: LoopKind, err: impl Into<ReconcileError>) {
        self.reporter.report(source, &err.into());
    }

    /// Bound a remote call by the request timeout.
    async fn remote<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, StatusError>>,
    ) -> Result<T, StatusError> {
        let limit = self.intervals.request_timeout;
        match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(StatusError::Transient(format!(
                "{} timed out after {:?}",
                operation, limit
            ))),
        }
    }

    /// Replace the current state and push the display diff.
    fn commit(&self, shared: &mut Shared, state: ReconciliationState) {
        if shared.state == state {
            return;
        }

        let display = DisplayState::project(&state, self.label_style);
        display.push_changes(&shared.display, self.surface.as_ref());
        debug!(from = %shared.state, to = %state, generation = shared.generation, "state changed");

        shared.display = display;
        shared.state = state;
        self.state_tx.send_replace(state);
    }

    /// Start a new episode, or join the one that makes it unnecessary.
    ///
    /// `seen_generation` is the generation the caller observed when it
    /// decided to re-authenticate. If an episode is in flight the caller
    /// joins it. If a newer episode than `seen_generation` has already
    /// succeeded the trigger is stale and the returned signal has already
    /// fired. Otherwise the display is disabled and generation
    /// `seen_generation + 1` starts.
    fn request_episode(self: &Arc<Self>, seen_generation: u64) -> EpisodeSignal {
        let mut shared = self.lock();

        if let Some(episode) = &shared.in_flight {
            debug!(generation = episode.generation(), "joining authentication episode in flight");
            return episode.signal();
        }
        if shared.generation > seen_generation {
            debug!(
                generation = shared.generation,
                seen_generation, "authentication episode already superseded"
            );
            return EpisodeSignal::completed(shared.generation);
        }

        shared.generation += 1;
        shared.episodes_started += 1;
        let generation = shared.generation;

        let (episode, signal) = Episode::new(generation);
        shared.in_flight = Some(episode);
        self.commit(&mut shared, ReconciliationState::Unauthenticated);

        info!(generation, "authentication episode started");
        let task = tokio::spawn(auth_loop::run(Arc::clone(self), generation));
        shared.auth_task = Some(task);

        signal
    }

    /// Wait until no episode is in flight and return the current generation.
    async fn wait_authenticated(&self) -> u64 {
        loop {
            let signal = {
                let shared = self.lock();
                match &shared.in_flight {
                    Some(episode) => episode.signal(),
                    None => return shared.generation,
                }
            };
            signal.wait().await;
        }
    }

    fn is_in_flight(shared: &Shared, generation: u64) -> bool {
        shared
            .in_flight
            .as_ref()
            .is_some_and(|episode| episode.generation() == generation)
    }

    /// Commit an intermediate state of episode `generation`.
    fn mark(&self, generation: u64, state: ReconciliationState) {
        let mut shared = self.lock();
        if Self::is_in_flight(&shared, generation) {
            self.commit(&mut shared, state);
        }
    }

    /// Finish episode `generation` with an authenticated state.
    ///
    /// The signal fires after the lock is released, so woken waiters
    /// already see the new state.
    fn complete_episode(&self, generation: u64, state: ReconciliationState) -> bool {
        let episode = {
            let mut shared = self.lock();
            if !Self::is_in_flight(&shared, generation) {
                return false;
            }
            let episode = shared.in_flight.take();
            self.commit(&mut shared, state);
            episode
        };

        if let Some(episode) = episode {
            episode.complete();
        }
        info!(generation, %state, "authentication episode succeeded");
        true
    }

    /// Commit a policy result fetched under `generation`.
    ///
    /// Discarded when an episode started since the call began, so a result
    /// tied to an old token never reaches the display.
    fn commit_poll(
        &self,
        generation: u64,
        next: impl FnOnce(ReconciliationState) -> ReconciliationState,
    ) -> bool {
        let mut shared = self.lock();
        if shared.in_flight.is_some() || shared.generation != generation {
            debug!(
                generation,
                current = shared.generation,
                "discarding policy result from a superseded episode"
            );
            return false;
        }
        let state = next(shared.state);
        self.commit(&mut shared, state);
        true
    }
}

/// Builder for [`Reconciler`].
pub struct ReconcilerBuilder {
    tokens: Arc<dyn TokenSource>,
    client: Arc<dyn StatusClient>,
    surface: Arc<dyn DisplaySurface>,
    reporter: Arc<dyn ErrorReporter>,
    browser: Arc<dyn Browser>,
    intervals: Intervals,
    label_style: LabelStyle,
}

impl ReconcilerBuilder {
    pub fn with_intervals(mut self, intervals: Intervals) -> Self {
        self.intervals = intervals;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_browser(mut self, browser: Arc<dyn Browser>) -> Self {
        self.browser = browser;
        self
    }

    pub fn with_label_style(mut self, label_style: LabelStyle) -> Self {
        self.label_style = label_style;
        self
    }

    /// Fails when the intervals are out of range.
    pub fn build(self) -> Result<Reconciler, ConfigError> {
        self.intervals.validate()?;

        let state = ReconciliationState::Unauthenticated;
        let (state_tx, _) = watch::channel(state);

        let shared = Shared {
            state,
            display: DisplayState::project(&state, self.label_style),
            generation: 0,
            in_flight: None,
            auth_task: None,
            episodes_started: 0,
        };

        Ok(Reconciler {
            inner: Arc::new(Inner {
                tokens: self.tokens,
                client: self.client,
                surface: self.surface,
                reporter: self.reporter,
                browser: self.browser,
                intervals: self.intervals,
                label_style: self.label_style,
                shared: Mutex::new(shared),
                state_tx,
            }),
        })
    }
}

/// The reconciler. Clones share the same state.
#[derive(Clone)]
pub struct Reconciler {
    inner: Arc<Inner>,
}

impl Reconciler {
    /// Builder with default intervals, a [`TracingReporter`] and the
    /// [`SystemBrowser`].
    pub fn builder(
        tokens: Arc<dyn TokenSource>,
        client: Arc<dyn StatusClient>,
        surface: Arc<dyn DisplaySurface>,
    ) -> ReconcilerBuilder {
        ReconcilerBuilder {
            tokens,
            client,
            surface,
            reporter: Arc::new(TracingReporter),
            browser: Arc::new(SystemBrowser),
            intervals: Intervals::default(),
            label_style: LabelStyle::platform_default(),
        }
    }

    pub fn new(
        tokens: Arc<dyn TokenSource>,
        client: Arc<dyn StatusClient>,
        surface: Arc<dyn DisplaySurface>,
        intervals: Intervals,
    ) -> Result<Self, ConfigError> {
        Self::builder(tokens, client, surface)
            .with_intervals(intervals)
            .build()
    }

    /// Push the initial display, start the first episode and spawn the
    /// policy and watch loops. Call once.
    pub fn start(&self) -> ReconcilerHandle {
        {
            let shared = self.inner.lock();
            shared.display.push_all(self.inner.surface.as_ref());
        }
        info!(
            auth_retry = ?self.inner.intervals.auth_retry,
            policy_poll = ?self.inner.intervals.policy_poll,
            token_watch = ?self.inner.intervals.token_watch,
            "reconciler starting"
        );

        let _ = self.inner.request_episode(0);

        let loops = vec![
            tokio::spawn(policy_loop::run(Arc::clone(&self.inner))),
            tokio::spawn(watch_loop::run(Arc::clone(&self.inner))),
        ];

        ReconcilerHandle {
            reconciler: self.clone(),
            loops,
        }
    }

    /// Force re-authentication unless an episode newer than
    /// `seen_generation` exists. See [`Reconciler::generation`].
    pub fn request_episode(&self, seen_generation: u64) -> EpisodeSignal {
        self.inner.request_episode(seen_generation)
    }

    /// Wait until no episode is in flight; returns the current generation.
    pub async fn wait_authenticated(&self) -> u64 {
        self.inner.wait_authenticated().await
    }

    pub fn subscribe(&self) -> watch::Receiver<ReconciliationState> {
        self.inner.state_tx.subscribe()
    }

    pub fn state(&self) -> ReconciliationState {
        self.inner.lock().state
    }

    pub fn display(&self) -> DisplayState {
        self.inner.lock().display.clone()
    }

    /// Generation of the newest episode started.
    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }

    /// Number of episodes ever started.
    pub fn episodes_started(&self) -> u64 {
        self.inner.lock().episodes_started
    }

    pub fn episode_in_flight(&self) -> bool {
        self.inner.lock().in_flight.is_some()
    }

    /// Open the page behind `item` for the cached token.
    pub fn open_item(&self, item: MenuItem) -> Result<(), ActionError> {
        if !self.display().is_enabled(item) {
            return Err(ActionError::ItemDisabled(item));
        }

        let token = self.inner.tokens.cached()?;
        let url = match item {
            MenuItem::MyDevice => self.inner.client.device_url(token.value()),
            MenuItem::Transparency => self.inner.client.transparency_url(token.value()),
        };

        self.inner.browser.open(&url).map_err(ActionError::Browser)?;
        info!(%item, "opened menu item");
        Ok(())
    }
}

/// Running loops of a started [`Reconciler`].
pub struct ReconcilerHandle {
    reconciler: Reconciler,
    loops: Vec<JoinHandle<()>>,
}

impl ReconcilerHandle {
    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    /// Abort every loop. Waiters on an unfinished episode are released.
    pub fn shutdown(self) {
        for task in &self.loops {
            task.abort();
        }

        let (auth_task, episode) = {
            let mut shared = self.reconciler.inner.lock();
            (shared.auth_task.take(), shared.in_flight.take())
        };
        if let Some(task) = auth_task {
            task.abort();
        }
        drop(episode);

        info!("reconciler stopped");
    }
}
