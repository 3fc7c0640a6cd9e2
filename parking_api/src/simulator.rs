use crate::state::SharedStore;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Applies ambient drift to the whole store every `period` until `shutdown` is cancelled.
///
/// The first pass happens one full period after start. Each pass runs under a single write guard.
pub async fn drift_loop(store: SharedStore, period: Duration, shutdown: CancellationToken) {
    info!(
        name: "drift_loop.initialized",
        period = %humantime::format_duration(period),
        "initialized ambient drift"
    );

    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {},
            _ = shutdown.cancelled() => {
                info!(name: "drift_loop.shutdown.requested", "shutdown requested, exiting drift loop");
                break;
            }
        }

        let report = store.write().drift();
        debug!(
            name: "drift_loop.pass.completed",
            facilities = report.facilities,
            changed = report.changed,
            "applied ambient drift"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use occupancy::OccupancyStore;
    use occupancy::dataset::montreal;

    const PERIOD: Duration = Duration::from_secs(10);

    fn seeded_store(seed: u64) -> OccupancyStore {
        OccupancyStore::seeded(montreal(), Some(seed)).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn drifts_once_per_period() {
        let state = AppState::new(seeded_store(5));
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(drift_loop(state.store.clone(), PERIOD, shutdown.clone()));

        tokio::time::sleep(Duration::from_secs(35)).await;
        shutdown.cancel();
        handle.await.unwrap();

        let mut expected = seeded_store(5);
        for _ in 0..3 {
            expected.drift();
        }
        assert_eq!(state.store.read().facilities(), expected.facilities());
    }

    #[tokio::test(start_paused = true)]
    async fn no_drift_before_first_period() {
        let state = AppState::new(seeded_store(5));
        let before = state.store.read().facilities().to_vec();
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(drift_loop(state.store.clone(), PERIOD, shutdown.clone()));

        tokio::time::sleep(Duration::from_secs(9)).await;
        shutdown.cancel();
        handle.await.unwrap();

        assert_eq!(state.store.read().facilities(), before.as_slice());
    }
}
