// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Freshness coordination for one active dashboard view.
//!
//! Three independent triggers request the same idempotent fetch:
//!
//! - Mount: an immediate fetch when the coordinator starts.
//! - External event: change notifications debounce behind a quiet
//!   window; every new notification reschedules the pending fetch, so a
//!   notification storm collapses into one fetch after the storm ends.
//! - Poll tick: an unconditional periodic fetch that masks a lost
//!   notification channel entirely.
//!
//! One driver task owns every timer and the notification subscription.
//! Stopping the handle aborts that task, which cancels the timers and
//! detaches the listener together, exactly once. Responses publish into
//! a watch channel as one value, so readers never observe a partial
//! update; a fetch sequence number discards responses that lost the race
//! to a newer one.

use crate::bus::ShipmentEvent;
use parcel_ops_api::{AggregateSource, DashboardData, FetchError, ShipmentSource, TimePeriod};
use parcel_ops_core::ViewerScope;
use parcel_ops_domain::ShipmentRecord;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep_until};
use tracing::{debug, info, warn};

/// Quiet window a notification burst must clear before a fetch fires.
const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Period of the unconditional polling backstop.
const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// What caused a fetch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTrigger {
    /// The view just became active.
    Mount,
    /// A change notification cleared the quiet window.
    ExternalEvent,
    /// The polling backstop fired.
    PollTick,
}

impl SyncTrigger {
    /// Returns the string representation of the trigger.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mount => "mount",
            Self::ExternalEvent => "external_event",
            Self::PollTick => "poll_tick",
        }
    }
}

impl std::fmt::Display for SyncTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coordinator tuning. Defaults match production behavior; tests shrink
/// the timers.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Time period the aggregate fetch is scoped to.
    pub period: TimePeriod,
    /// Quiet window for the notification debounce.
    pub debounce: Duration,
    /// Period of the polling backstop.
    pub poll_interval: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            period: TimePeriod::Month,
            debounce: DEBOUNCE_WINDOW,
            poll_interval: POLL_INTERVAL,
        }
    }
}

/// The published feed for one dashboard view.
///
/// Stats, charts, and the shipment collection from one fetch are written
/// together as a single value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedState {
    /// Aggregates and chart series.
    pub data: DashboardData,
    /// The full shipment collection for the viewer scope.
    pub shipments: Vec<ShipmentRecord>,
    /// Why the most recent fetch failed, if it did. The data fields
    /// still hold the previous successful snapshot; presentation uses
    /// this to surface a retry affordance.
    pub last_error: Option<String>,
    /// Number of successful refreshes published so far.
    pub refreshes: u64,
}

/// One completed fetch, tagged for the stale-response guard.
struct FetchOutcome {
    seq: u64,
    trigger: SyncTrigger,
    result: Result<(DashboardData, Vec<ShipmentRecord>), FetchError>,
}

/// Starts and owns the refresh machinery for one dashboard view.
pub struct SyncCoordinator;

impl SyncCoordinator {
    /// Starts the coordinator for a view.
    ///
    /// The returned handle is the only way to observe the feed and the
    /// only way to tear the machinery down.
    #[must_use]
    pub fn start<S>(
        source: Arc<S>,
        scope: ViewerScope,
        events: broadcast::Receiver<ShipmentEvent>,
        config: SyncConfig,
    ) -> SyncHandle
    where
        S: AggregateSource + ShipmentSource,
    {
        info!(role = %scope.role(), period = %config.period, "Sync coordinator starting");
        let (feed_tx, feed_rx) = watch::channel(FeedState::default());
        let task = tokio::spawn(drive(source, scope, events, config, feed_tx));
        SyncHandle {
            task,
            feed: feed_rx,
        }
    }
}

/// Handle to a running coordinator.
///
/// Dropping the handle tears the coordinator down, so an inactive view
/// can never leak timers or listeners.
pub struct SyncHandle {
    task: JoinHandle<()>,
    feed: watch::Receiver<FeedState>,
}

impl SyncHandle {
    /// Returns a receiver for the published feed.
    #[must_use]
    pub fn feed(&self) -> watch::Receiver<FeedState> {
        self.feed.clone()
    }

    /// Stops the coordinator: timers cancelled, listener detached.
    pub fn stop(self) {
        self.task.abort();
        info!("Sync coordinator stopped");
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// The driver loop. Owns every timer and the notification subscription;
/// aborted wholesale at teardown.
async fn drive<S>(
    source: Arc<S>,
    scope: ViewerScope,
    mut events: broadcast::Receiver<ShipmentEvent>,
    config: SyncConfig,
    feed: watch::Sender<FeedState>,
) where
    S: AggregateSource + ShipmentSource,
{
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    let mut next_seq: u64 = 0;
    let mut newest_published: u64 = 0;
    let mut pending_debounce: Option<Instant> = None;
    let mut events_open = true;

    // The first poll tick is one full period out; the mount fetch covers
    // the present.
    let mut poll = interval_at(Instant::now() + config.poll_interval, config.poll_interval);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

    spawn_fetch(
        SyncTrigger::Mount,
        &mut next_seq,
        &source,
        &scope,
        config.period,
        &done_tx,
    );

    loop {
        // `pending_debounce` is Copy; the future owns this iteration's
        // deadline and the handlers stay free to reschedule it.
        let debounce_elapsed = async move {
            match pending_debounce {
                Some(deadline) => sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            () = debounce_elapsed => {
                pending_debounce = None;
                spawn_fetch(
                    SyncTrigger::ExternalEvent,
                    &mut next_seq,
                    &source,
                    &scope,
                    config.period,
                    &done_tx,
                );
            }
            _ = poll.tick() => {
                spawn_fetch(
                    SyncTrigger::PollTick,
                    &mut next_seq,
                    &source,
                    &scope,
                    config.period,
                    &done_tx,
                );
            }
            event = events.recv(), if events_open => {
                match event {
                    Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {
                        // A lagged receiver still learned that something
                        // changed, which is all a notification carries.
                        pending_debounce = Some(Instant::now() + config.debounce);
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        warn!("Notification channel closed; polling backstop continues");
                        events_open = false;
                    }
                }
            }
            Some(outcome) = done_rx.recv() => {
                publish(&feed, outcome, &mut newest_published);
            }
        }
    }
}

/// Requests one fetch on its own task so triggers never block each
/// other. The driver owns the result channel; a torn-down driver means
/// the send fails and the response evaporates.
fn spawn_fetch<S>(
    trigger: SyncTrigger,
    next_seq: &mut u64,
    source: &Arc<S>,
    scope: &ViewerScope,
    period: TimePeriod,
    done: &mpsc::UnboundedSender<FetchOutcome>,
) where
    S: AggregateSource + ShipmentSource,
{
    *next_seq += 1;
    let seq = *next_seq;
    debug!(%trigger, seq, "Fetch requested");

    let source = Arc::clone(source);
    let scope = scope.clone();
    let done = done.clone();
    tokio::spawn(async move {
        let result = fetch_all(&*source, period, &scope).await;
        let _ = done.send(FetchOutcome {
            seq,
            trigger,
            result,
        });
    });
}

/// One complete fetch: aggregates plus the shipment collection.
async fn fetch_all<S>(
    source: &S,
    period: TimePeriod,
    scope: &ViewerScope,
) -> Result<(DashboardData, Vec<ShipmentRecord>), FetchError>
where
    S: AggregateSource + ShipmentSource,
{
    let data = source.fetch_dashboard(period, scope).await?;
    let shipments = source.fetch_shipments(scope).await?;
    Ok((data, shipments))
}

/// Publishes a fetch outcome, discarding responses staler than the
/// newest already published.
fn publish(feed: &watch::Sender<FeedState>, outcome: FetchOutcome, newest_published: &mut u64) {
    if outcome.seq < *newest_published {
        debug!(
            seq = outcome.seq,
            newest = *newest_published,
            "Discarding stale fetch response"
        );
        return;
    }
    *newest_published = outcome.seq;

    match outcome.result {
        Ok((data, shipments)) => {
            debug!(trigger = %outcome.trigger, seq = outcome.seq, "Publishing refreshed feed");
            feed.send_modify(|state| {
                state.data = data;
                state.shipments = shipments;
                state.last_error = None;
                state.refreshes += 1;
            });
        }
        Err(e) => {
            warn!(trigger = %outcome.trigger, %e, "Fetch failed; keeping previous snapshot");
            feed.send_modify(|state| {
                state.last_error = Some(e.to_string());
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::bus::ShipmentEventBus;
    use parcel_ops_api::SummaryStats;
    use parcel_ops_core::ViewerRole;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::{Duration, sleep};

    /// Counts fetches and, per call, applies a configured delay so a
    /// test can stage overlapping responses.
    struct StubSource {
        calls: AtomicUsize,
        delays: Vec<Duration>,
        fail_all: bool,
    }

    impl StubSource {
        fn instant() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delays: Vec::new(),
                fail_all: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delays: Vec::new(),
                fail_all: true,
            }
        }

        fn with_delays(delays: Vec<Duration>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delays,
                fail_all: false,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AggregateSource for StubSource {
        fn fetch_dashboard(
            &self,
            _period: TimePeriod,
            _scope: &ViewerScope,
        ) -> impl Future<Output = Result<DashboardData, FetchError>> + Send {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            let delay = self.delays.get(call - 1).copied().unwrap_or(Duration::ZERO);
            let fail = self.fail_all;
            async move {
                if !delay.is_zero() {
                    sleep(delay).await;
                }
                if fail {
                    return Err(FetchError::Network {
                        reason: String::from("stub offline"),
                    });
                }
                Ok(DashboardData {
                    stats: SummaryStats {
                        total_count: call as u64,
                        ..SummaryStats::default()
                    },
                    ..DashboardData::default()
                })
            }
        }
    }

    impl ShipmentSource for StubSource {
        fn fetch_shipments(
            &self,
            _scope: &ViewerScope,
        ) -> impl Future<Output = Result<Vec<ShipmentRecord>, FetchError>> + Send {
            async move { Ok(Vec::new()) }
        }
    }

    fn test_config() -> SyncConfig {
        SyncConfig {
            period: TimePeriod::Month,
            debounce: Duration::from_millis(500),
            // Far enough out that polling never interferes with the
            // debounce assertions.
            poll_interval: Duration::from_secs(10_000),
        }
    }

    fn admin() -> ViewerScope {
        ViewerScope::for_role(ViewerRole::Admin, None)
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_triggers_an_immediate_fetch() {
        let source = Arc::new(StubSource::instant());
        let bus = ShipmentEventBus::new();
        let handle =
            SyncCoordinator::start(Arc::clone(&source), admin(), bus.subscribe(), test_config());

        sleep(Duration::from_millis(10)).await;
        assert_eq!(source.call_count(), 1);
        assert_eq!(handle.feed().borrow().refreshes, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_notification_burst_collapses_into_one_fetch_after_quiet_window() {
        let source = Arc::new(StubSource::instant());
        let bus = ShipmentEventBus::new();
        let handle =
            SyncCoordinator::start(Arc::clone(&source), admin(), bus.subscribe(), test_config());

        sleep(Duration::from_millis(5)).await;
        assert_eq!(source.call_count(), 1); // mount

        // Notifications at t=0, t=100, t=200.
        bus.notify(&ShipmentEvent { tracking_id: None });
        sleep(Duration::from_millis(100)).await;
        bus.notify(&ShipmentEvent { tracking_id: None });
        sleep(Duration::from_millis(100)).await;
        bus.notify(&ShipmentEvent { tracking_id: None });

        // The quiet window runs from the last notification: nothing may
        // fire before t=700.
        sleep(Duration::from_millis(480)).await; // t=680
        assert_eq!(source.call_count(), 1);

        sleep(Duration::from_millis(40)).await; // t=720
        assert_eq!(source.call_count(), 2);
        assert_eq!(handle.feed().borrow().refreshes, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_notifications_each_earn_a_fetch() {
        let source = Arc::new(StubSource::instant());
        let bus = ShipmentEventBus::new();
        let _handle =
            SyncCoordinator::start(Arc::clone(&source), admin(), bus.subscribe(), test_config());

        sleep(Duration::from_millis(5)).await;

        bus.notify(&ShipmentEvent { tracking_id: None });
        sleep(Duration::from_millis(600)).await; // first debounce fired at t=500
        assert_eq!(source.call_count(), 2);

        bus.notify(&ShipmentEvent { tracking_id: None });
        sleep(Duration::from_millis(600)).await; // second fired at t=1100
        assert_eq!(source.call_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_polling_backstop_fires_without_any_notifications() {
        let source = Arc::new(StubSource::instant());
        let bus = ShipmentEventBus::new();
        let config = SyncConfig {
            poll_interval: Duration::from_secs(30),
            ..test_config()
        };
        let _handle =
            SyncCoordinator::start(Arc::clone(&source), admin(), bus.subscribe(), config);

        sleep(Duration::from_secs(95)).await;
        // Mount plus ticks at 30s, 60s, 90s.
        assert_eq!(source.call_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_silences_every_trigger() {
        let source = Arc::new(StubSource::instant());
        let bus = ShipmentEventBus::new();
        let config = SyncConfig {
            poll_interval: Duration::from_secs(30),
            ..test_config()
        };
        let handle =
            SyncCoordinator::start(Arc::clone(&source), admin(), bus.subscribe(), config);

        sleep(Duration::from_millis(10)).await;
        assert_eq!(source.call_count(), 1);

        handle.stop();
        sleep(Duration::from_millis(10)).await;

        bus.notify(&ShipmentEvent { tracking_id: None });
        sleep(Duration::from_secs(300)).await;
        // No debounce fetch, no poll tick after teardown.
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_keeps_previous_snapshot_and_flags_retry() {
        let source = Arc::new(StubSource::failing());
        let bus = ShipmentEventBus::new();
        let handle =
            SyncCoordinator::start(Arc::clone(&source), admin(), bus.subscribe(), test_config());

        sleep(Duration::from_millis(10)).await;
        let state = handle.feed().borrow().clone();
        assert_eq!(state.refreshes, 0);
        assert_eq!(state.data, DashboardData::default());
        assert!(state.last_error.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_loses_to_a_newer_one() {
        // The mount fetch takes 10s; a notification-triggered fetch at
        // t=500 resolves immediately and must not be overwritten when
        // the slow mount response finally lands.
        let source = Arc::new(StubSource::with_delays(vec![
            Duration::from_secs(10),
            Duration::ZERO,
        ]));
        let bus = ShipmentEventBus::new();
        let handle =
            SyncCoordinator::start(Arc::clone(&source), admin(), bus.subscribe(), test_config());

        sleep(Duration::from_millis(5)).await;
        bus.notify(&ShipmentEvent { tracking_id: None });

        sleep(Duration::from_millis(600)).await;
        assert_eq!(handle.feed().borrow().data.stats.total_count, 2);

        sleep(Duration::from_secs(15)).await;
        let state = handle.feed().borrow().clone();
        assert_eq!(state.data.stats.total_count, 2, "stale response overwrote");
        assert_eq!(state.refreshes, 1);
    }
}
