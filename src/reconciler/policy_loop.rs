//! Policy loop: refreshes the failing policy count.
//!
//! Starts after the first episode succeeds, polls once immediately and then
//! on every tick. Before each poll it waits out any episode in flight, and
//! results are committed only if no episode started during the call.

use std::sync::Arc;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use super::{Inner, ReconciliationState};
use crate::error::StatusError;
use crate::traits::LoopKind;

pub(super) async fn run(inner: Arc<Inner>) {
    inner.wait_authenticated().await;

    let period = inner.intervals.policy_poll;
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        poll_once(&inner).await;
        ticker.tick().await;
    }
}

async fn poll_once(inner: &Arc<Inner>) {
    let generation = inner.wait_authenticated().await;

    let token = match inner.tokens.cached() {
        Ok(token) => token,
        Err(err) => {
            inner.report(LoopKind::PolicyPoll, err);
            return;
        }
    };

    let outcome = inner
        .remote(
            "policy count",
            inner.client.failing_policy_count(token.value()),
        )
        .await;

    match outcome {
        Ok(count) => {
            debug!(generation, count, "failing policies fetched");
            inner.commit_poll(generation, |_| ReconciliationState::Authenticated {
                failure_count: Some(count),
                entitled: true,
            });
        }
        Err(StatusError::MissingEntitlement) => {
            debug!(generation, "policy status not entitled");
            inner.commit_poll(generation, |previous| ReconciliationState::Authenticated {
                failure_count: previous.failure_count(),
                entitled: false,
            });
        }
        Err(err @ StatusError::Unauthenticated) => {
            inner.report(LoopKind::PolicyPoll, err);
            info!(generation, "token rejected during policy poll, re-authenticating");
            inner.request_episode(generation).wait().await;
        }
        Err(err) => {
            inner.report(LoopKind::PolicyPoll, err);
        }
    }
}
