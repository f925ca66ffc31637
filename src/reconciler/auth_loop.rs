//! Authentication loop: one instance per episode.
//!
//! Each tick re-reads the token (failures are only reported, the cached
//! token stays usable), then probes the service with the cached token.
//! The instance exits on the first accepted probe.

use std::sync::Arc;

use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use super::{Inner, ReconciliationState};
use crate::error::StatusError;
use crate::traits::LoopKind;

pub(super) async fn run(inner: Arc<Inner>, generation: u64) {
    let mut ticker = interval(inner.intervals.auth_retry);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut attempt = 0u32;
    loop {
        ticker.tick().await;
        attempt += 1;
        debug!(generation, attempt, "authentication attempt");

        if try_authenticate(&inner, generation).await {
            return;
        }
    }
}

/// One attempt. Returns true when the episode is finished.
async fn try_authenticate(inner: &Inner, generation: u64) -> bool {
    if let Err(err) = inner.tokens.read().await {
        inner.report(LoopKind::Authentication, err);
    }

    let token = match inner.tokens.cached() {
        Ok(token) => token,
        Err(err) => {
            inner.report(LoopKind::Authentication, err);
            return false;
        }
    };

    inner.mark(generation, ReconciliationState::Authenticating);
    let outcome = inner
        .remote(
            "authentication probe",
            inner.client.probe_authentication(token.value()),
        )
        .await;

    match outcome {
        Ok(status) => inner.complete_episode(
            generation,
            ReconciliationState::Authenticated {
                failure_count: Some(status.failing_policies),
                entitled: true,
            },
        ),
        Err(StatusError::MissingEntitlement) => inner.complete_episode(
            generation,
            ReconciliationState::Authenticated {
                failure_count: None,
                entitled: false,
            },
        ),
        Err(err @ StatusError::Unauthenticated) => {
            inner.mark(generation, ReconciliationState::Unauthenticated);
            inner.report(LoopKind::Authentication, err);
            false
        }
        Err(err) => {
            inner.report(LoopKind::Authentication, err);
            false
        }
    }
}
