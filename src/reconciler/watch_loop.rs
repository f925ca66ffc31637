//! Watch loop: surfaces token rotation without a restart.

use std::sync::Arc;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::info;

use super::Inner;
use crate::traits::LoopKind;

pub(super) async fn run(inner: Arc<Inner>) {
    inner.wait_authenticated().await;

    let period = inner.intervals.token_watch;
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        // Taken before the stat, so an episode that completes in between
        // makes this trigger stale instead of starting another one.
        let seen = inner.lock().generation;

        match inner.tokens.has_changed().await {
            Ok(true) => {
                info!(generation = seen, "device token changed, re-authenticating");
                inner.request_episode(seen).wait().await;
                ticker.reset();
            }
            Ok(false) => {}
            Err(err) => inner.report(LoopKind::TokenWatch, err),
        }
    }
}
