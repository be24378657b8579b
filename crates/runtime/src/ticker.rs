use std::future::Future;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use crate::cycle::RenderCycle;

/// Time between refreshes. Fixed: not configurable and not stretched after
/// failures.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(3);

/// Drives a [`RenderCycle`]: one refresh right away, then one per period.
///
/// Refreshes run one at a time. When a refresh overruns the period the
/// missed ticks are dropped rather than queued, so the loop never falls
/// behind by more than one refresh.
#[derive(Debug, Copy, Clone)]
pub struct Ticker {
    period: Duration,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker {
    pub fn new() -> Self {
        Self {
            period: REFRESH_PERIOD,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Refreshes until `shutdown` resolves. A refresh already in progress is
    /// allowed to finish.
    pub async fn run<F>(&self, cycle: &mut RenderCycle, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        let mut ticks = interval(self.period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(period_ms = self.period.as_millis() as u64, "refresh loop started");
        let mut refreshes = 0u64;
        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticks.tick() => {
                    cycle.refresh().await;
                    refreshes += 1;
                }
            }
        }
        info!(refreshes, "refresh loop stopped");
        refreshes
    }
}
