//! The poll cycle and the loop that drives it.
//!
//! One cycle is fetch -> filter -> notify. A fetch or parse failure aborts
//! the cycle before any notify attempt. Cycles are awaited inline by the
//! loop, so two cycles never run in parallel; ticks missed while a slow
//! cycle runs are skipped rather than burst afterwards.

use chrono::{Duration, Utc};
use std::collections::HashSet;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use crate::client::CommentClient;
use crate::error::PollError;
use crate::filter::filter_unanswered;
use crate::notify::Notifier;

pub struct Poller {
    client: CommentClient,
    notifier: Notifier,
    interval_minutes: u64,
    window: Duration,
    excluded: HashSet<String>,
}

impl Poller {
    pub fn new(
        client: CommentClient,
        notifier: Notifier,
        interval_minutes: u64,
        window: Duration,
        excluded: HashSet<String>,
    ) -> Self {
        Self {
            client,
            notifier,
            interval_minutes,
            window,
            excluded,
        }
    }

    /// One fetch-filter-notify pass.
    pub async fn run_cycle(&self) -> Result<(), PollError> {
        let page = self.client.fetch().await?;
        let urls = filter_unanswered(&page.comments, Utc::now(), self.window, &self.excluded);
        self.notifier.notify(&urls, self.interval_minutes).await
    }
}

/// Drive cycles forever: one immediately at startup, then one per tick.
/// Every failure is isolated to its cycle.
pub async fn run_poller(poller: Poller, period: std::time::Duration) {
    info!("poller starting, running initial cycle");
    if let Err(e) = poller.run_cycle().await {
        error!("cycle failed: {e}");
    }

    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await; // consume the immediate tick, we already ran

    loop {
        interval.tick().await;
        if let Err(e) = poller.run_cycle().await {
            error!("cycle failed: {e}");
        }
    }
}
