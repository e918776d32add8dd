//! Periodic gold-rate retrieval.
//!
//! [`GoldFetcher`] runs on its own task: it fetches once at startup, then on
//! every interval tick and on every manual refresh request. Each cycle is
//! guarded by a [`FetchGate`] so at most one retrieval is in flight; a
//! trigger that arrives while one is running is dropped. Results are sent to
//! the UI as [`GoldUpdate`] messages.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use gold_rates::{GoldClient, GoldError, GoldRates};
use tokio::sync::{broadcast, mpsc};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Something that can produce current gold rates.
pub trait RateSource: Send + Sync + 'static {
    /// Retrieves and parses the current unit prices.
    fn fetch_rates(&self) -> impl Future<Output = Result<GoldRates, GoldError>> + Send;
}

impl RateSource for GoldClient {
    fn fetch_rates(&self) -> impl Future<Output = Result<GoldRates, GoldError>> + Send {
        gold_rates::fetch_rates(self)
    }
}

/// Message from the fetcher to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum GoldUpdate {
    /// A retrieval started.
    Fetching,
    /// Fresh rates arrived.
    Fetched {
        /// Parsed unit prices.
        rates: GoldRates,
        /// Local time of arrival.
        at: DateTime<Local>,
    },
    /// The retrieval failed; the UI shows fallback values.
    Failed {
        /// Display form of the error.
        reason: String,
    },
}

/// Gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    /// No retrieval in flight.
    Idle,
    /// A retrieval is in flight.
    Fetching,
}

/// In-flight guard shared by every fetch trigger.
#[derive(Debug, Clone, Default)]
pub struct FetchGate {
    in_flight: Arc<AtomicBool>,
}

impl FetchGate {
    /// Creates an idle gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the gate. Returns `None` while another ticket is alive.
    pub fn try_begin(&self) -> Option<FetchTicket> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| FetchTicket {
                in_flight: Arc::clone(&self.in_flight),
            })
    }

    /// Current state.
    pub fn state(&self) -> FetchState {
        if self.in_flight.load(Ordering::SeqCst) {
            FetchState::Fetching
        } else {
            FetchState::Idle
        }
    }
}

/// RAII claim on a [`FetchGate`]; releases the gate on drop.
#[derive(Debug)]
pub struct FetchTicket {
    in_flight: Arc<AtomicBool>,
}

impl Drop for FetchTicket {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }
}

/// Runs one retrieval and converts the result into an update.
///
/// Never fails: errors become [`GoldUpdate::Failed`].
pub async fn fetch_update<S: RateSource>(source: &S) -> GoldUpdate {
    match source.fetch_rates().await {
        Ok(rates) => {
            debug!(k22 = rates.k22, k24 = rates.k24, "gold rates fetched");
            GoldUpdate::Fetched {
                rates,
                at: Local::now(),
            }
        }
        Err(e) => {
            warn!(error = %e, "gold rate fetch failed, using fallback");
            GoldUpdate::Failed {
                reason: e.to_string(),
            }
        }
    }
}

async fn run_cycle<S: RateSource>(source: &S, update_tx: &mpsc::Sender<GoldUpdate>) {
    // A closed channel means the UI is gone; nothing left to report to.
    let _ = update_tx.send(GoldUpdate::Fetching).await;
    let update = fetch_update(source).await;
    let _ = update_tx.send(update).await;
}

/// Shortest accepted refresh interval; shorter ones are raised to it.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Periodic fetch loop.
pub struct GoldFetcher<S> {
    source: Arc<S>,
    interval: Duration,
    gate: FetchGate,
    update_tx: mpsc::Sender<GoldUpdate>,
}

impl<S: RateSource> GoldFetcher<S> {
    /// Creates a fetcher reporting to `update_tx`.
    ///
    /// `interval` is raised to [`MIN_REFRESH_INTERVAL`] if shorter.
    pub fn new(source: S, interval: Duration, update_tx: mpsc::Sender<GoldUpdate>) -> Self {
        Self {
            source: Arc::new(source),
            interval: interval.max(MIN_REFRESH_INTERVAL),
            gate: FetchGate::new(),
            update_tx,
        }
    }

    /// Handle to the in-flight gate.
    pub fn gate(&self) -> FetchGate {
        self.gate.clone()
    }

    /// Starts a cycle on a new task unless one is already in flight.
    ///
    /// Returns whether a cycle was started.
    pub fn trigger(&self) -> bool {
        let Some(ticket) = self.gate.try_begin() else {
            debug!("gold fetch already in flight, skipping");
            return false;
        };
        let source = Arc::clone(&self.source);
        let update_tx = self.update_tx.clone();
        tokio::spawn(async move {
            let _ticket = ticket;
            run_cycle(source.as_ref(), &update_tx).await;
        });
        true
    }

    /// Runs until `shutdown_rx` fires.
    ///
    /// The first interval tick completes immediately, which is the startup
    /// fetch. Each message on `refresh_rx` triggers an extra cycle.
    pub async fn run(self, mut refresh_rx: mpsc::Receiver<()>, mut shutdown_rx: broadcast::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval = ?self.interval, "gold fetcher started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.trigger();
                }
                Some(()) = refresh_rx.recv() => {
                    debug!("manual gold refresh requested");
                    self.trigger();
                }
                _ = shutdown_rx.recv() => {
                    info!("gold fetcher shutting down");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gold_rates::{FetchError, ParseError};
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    struct StubSource {
        result: Result<GoldRates, &'static str>,
        calls: Arc<AtomicUsize>,
    }

    impl StubSource {
        fn ok(k22: f64, k24: f64) -> Self {
            Self {
                result: Ok(GoldRates::new(k22, k24)),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn no_content() -> Self {
            Self {
                result: Err("no content"),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl RateSource for StubSource {
        fn fetch_rates(&self) -> impl Future<Output = Result<GoldRates, GoldError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let result = self.result.map_err(|_| GoldError::from(FetchError::NoContent));
            async move { result }
        }
    }

    /// Source that blocks until released.
    struct GatedSource {
        release: Arc<Notify>,
    }

    impl RateSource for GatedSource {
        fn fetch_rates(&self) -> impl Future<Output = Result<GoldRates, GoldError>> + Send {
            let release = Arc::clone(&self.release);
            async move {
                release.notified().await;
                Err(GoldError::from(ParseError::MissingPrice { k22: 0.0, k24: 0.0 }))
            }
        }
    }

    #[tokio::test]
    async fn zero_interval_is_raised_to_minimum() {
        let (tx, mut rx) = mpsc::channel(8);
        let (_refresh_tx, refresh_rx) = mpsc::channel(1);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let fetcher = GoldFetcher::new(StubSource::ok(1.0, 2.0), Duration::ZERO, tx);
        assert_eq!(fetcher.interval, MIN_REFRESH_INTERVAL);
        let handle = tokio::spawn(fetcher.run(refresh_rx, shutdown_rx));

        assert_eq!(rx.recv().await, Some(GoldUpdate::Fetching));
        assert!(matches!(rx.recv().await, Some(GoldUpdate::Fetched { .. })));
        shutdown_tx.send(()).expect("shutdown");
        handle.await.expect("fetcher task must not panic");
    }

    async fn wait_idle(gate: &FetchGate) {
        for _ in 0..200 {
            if gate.state() == FetchState::Idle {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[test]
    fn gate_allows_one_ticket_at_a_time() {
        let gate = FetchGate::new();
        assert_eq!(gate.state(), FetchState::Idle);
        let ticket = gate.try_begin().expect("first claim");
        assert_eq!(gate.state(), FetchState::Fetching);
        assert!(gate.try_begin().is_none());
        drop(ticket);
        assert_eq!(gate.state(), FetchState::Idle);
        assert!(gate.try_begin().is_some());
    }

    #[tokio::test]
    async fn fetch_update_success() {
        let update = fetch_update(&StubSource::ok(8120.0, 8858.0)).await;
        assert!(matches!(
            update,
            GoldUpdate::Fetched { rates, .. } if rates == GoldRates::new(8120.0, 8858.0)
        ));
    }

    #[tokio::test]
    async fn fetch_update_failure_does_not_propagate() {
        let update = fetch_update(&StubSource::no_content()).await;
        assert_eq!(
            update,
            GoldUpdate::Failed {
                reason: "No content received".to_string()
            }
        );
    }

    #[tokio::test]
    async fn trigger_reports_fetching_then_result() {
        let (tx, mut rx) = mpsc::channel(8);
        let fetcher = GoldFetcher::new(StubSource::ok(1.0, 2.0), Duration::from_secs(300), tx);
        assert!(fetcher.trigger());
        assert_eq!(rx.recv().await, Some(GoldUpdate::Fetching));
        assert!(matches!(rx.recv().await, Some(GoldUpdate::Fetched { .. })));
    }

    #[tokio::test]
    async fn second_trigger_while_in_flight_is_skipped() {
        let release = Arc::new(Notify::new());
        let (tx, mut rx) = mpsc::channel(8);
        let fetcher = GoldFetcher::new(
            GatedSource {
                release: Arc::clone(&release),
            },
            Duration::from_secs(300),
            tx,
        );

        assert!(fetcher.trigger());
        assert_eq!(rx.recv().await, Some(GoldUpdate::Fetching));
        assert!(!fetcher.trigger(), "gate should reject a concurrent fetch");

        release.notify_one();
        assert!(matches!(rx.recv().await, Some(GoldUpdate::Failed { .. })));

        // The ticket is released when the task finishes.
        wait_idle(&fetcher.gate()).await;
        assert_eq!(fetcher.gate().state(), FetchState::Idle);
    }

    #[tokio::test]
    async fn run_fetches_immediately_and_on_refresh() {
        let source = StubSource::ok(1.0, 2.0);
        let calls = Arc::clone(&source.calls);
        let (tx, mut rx) = mpsc::channel(8);
        let (refresh_tx, refresh_rx) = mpsc::channel(1);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let fetcher = GoldFetcher::new(source, Duration::from_secs(3600), tx);
        let gate = fetcher.gate();
        let handle = tokio::spawn(fetcher.run(refresh_rx, shutdown_rx));

        assert_eq!(rx.recv().await, Some(GoldUpdate::Fetching));
        assert!(matches!(rx.recv().await, Some(GoldUpdate::Fetched { .. })));
        wait_idle(&gate).await;

        refresh_tx.send(()).await.expect("refresh");
        assert_eq!(rx.recv().await, Some(GoldUpdate::Fetching));
        assert!(matches!(rx.recv().await, Some(GoldUpdate::Fetched { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        shutdown_tx.send(()).expect("shutdown");
        handle.await.expect("fetcher task");
    }
}
