//! Fetch orchestration for the global portfolio cache.
//!
//! A fetch sequence runs when the cache is stale:
//!
//! 1. mark loading, clear the error
//! 2. start preloading critical images (not awaited)
//! 3. fetch the aggregate for the configured locale
//! 4. report the elapsed time as `global_portfolio_data`
//! 5. on success store the data, stamp the fetch time, preload its images
//!    and then each section's images (except home and contact)
//! 6. clear `is_initial_load`
//! 7. on failure store the message, keep the previous data
//! 8. clear loading, on every exit path
//!
//! Only one sequence runs at a time; a concurrent evaluation is rejected
//! with `Evaluation::AlreadyInFlight`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::models::{Section, SectionValue};
use crate::preload::{ImagePreloader, NoopPreloader};
use crate::service::{PortfolioService, DEFAULT_LOCALE};
use crate::telemetry::{PerformanceTracker, TracingTracker, GLOBAL_PORTFOLIO_DATA};

use super::clock::{Clock, SystemClock};
use super::state::CacheSnapshot;

/// Cached data is considered stale after 30 minutes.
pub const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(30 * 60);

/// Outcome of one staleness evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Cached data is fresh; nothing was fetched
    Fresh,
    /// A fetch sequence ran and stored new data
    Fetched,
    /// A fetch sequence ran and failed; the error is in the snapshot
    Failed,
    /// Another fetch sequence was already running
    AlreadyInFlight,
}

/// One section projected out of the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionData {
    pub data: Option<SectionValue>,
    pub loading: bool,
    pub error: Option<String>,
}

struct Inner {
    state: watch::Sender<CacheSnapshot>,
    show_progress: AtomicBool,
    in_flight: AtomicBool,
    service: Arc<dyn PortfolioService>,
    preloader: Arc<dyn ImagePreloader>,
    tracker: Arc<dyn PerformanceTracker>,
    clock: Arc<dyn Clock>,
    cache_duration_ms: i64,
    locale: String,
}

/// Handle to the global portfolio cache. Clone is cheap and shares state.
#[derive(Clone)]
pub struct PortfolioCache {
    inner: Arc<Inner>,
}

pub struct PortfolioCacheBuilder {
    service: Arc<dyn PortfolioService>,
    preloader: Arc<dyn ImagePreloader>,
    tracker: Arc<dyn PerformanceTracker>,
    clock: Arc<dyn Clock>,
    cache_duration: Duration,
    locale: String,
}

impl PortfolioCacheBuilder {
    pub fn preloader(mut self, preloader: Arc<dyn ImagePreloader>) -> Self {
        self.preloader = preloader;
        self
    }

    pub fn tracker(mut self, tracker: Arc<dyn PerformanceTracker>) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn cache_duration(mut self, duration: Duration) -> Self {
        self.cache_duration = duration;
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn build(self) -> PortfolioCache {
        let (state, _) = watch::channel(CacheSnapshot::default());
        PortfolioCache {
            inner: Arc::new(Inner {
                state,
                show_progress: AtomicBool::new(true),
                in_flight: AtomicBool::new(false),
                service: self.service,
                preloader: self.preloader,
                tracker: self.tracker,
                clock: self.clock,
                cache_duration_ms: i64::try_from(self.cache_duration.as_millis())
                    .unwrap_or(i64::MAX),
                locale: self.locale,
            }),
        }
    }
}

/// Clears `loading` and releases the in-flight flag when a fetch sequence
/// ends, including when its future is dropped mid-fetch.
struct FetchGuard<'a> {
    inner: &'a Inner,
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.inner.state.send_modify(|s| s.loading = false);
        self.inner.in_flight.store(false, Ordering::SeqCst);
    }
}

impl PortfolioCache {
    /// Start building a cache around a data service. Preloading is off and
    /// measurements go to a `TracingTracker` unless configured otherwise.
    pub fn builder(service: Arc<dyn PortfolioService>) -> PortfolioCacheBuilder {
        PortfolioCacheBuilder {
            service,
            preloader: Arc::new(NoopPreloader),
            tracker: Arc::new(TracingTracker::new()),
            clock: Arc::new(SystemClock),
            cache_duration: DEFAULT_CACHE_DURATION,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    pub fn snapshot(&self) -> CacheSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Receive every state change.
    pub fn subscribe(&self) -> watch::Receiver<CacheSnapshot> {
        self.inner.state.subscribe()
    }

    pub fn now_ms(&self) -> i64 {
        self.inner.clock.now_ms()
    }

    pub fn is_stale(&self) -> bool {
        self.inner
            .state
            .borrow()
            .is_stale(self.now_ms(), self.inner.cache_duration_ms)
    }

    pub fn is_fetching(&self) -> bool {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    /// Check staleness and fetch if needed.
    pub async fn evaluate(&self) -> Evaluation {
        if !self.is_stale() {
            if !self.is_fetching() {
                self.inner.state.send_if_modified(|s| {
                    let was_loading = s.loading;
                    s.loading = false;
                    was_loading
                });
            }
            return Evaluation::Fresh;
        }

        if self
            .inner
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Fetch already in flight, skipping");
            return Evaluation::AlreadyInFlight;
        }

        self.run_fetch_sequence().await
    }

    /// Force the next evaluation to fetch, then evaluate. Existing data stays
    /// visible until the new fetch resolves.
    pub async fn refetch(&self) -> Evaluation {
        info!("Refetch requested");
        self.inner.state.send_modify(|s| s.last_fetch = 0);
        self.evaluate().await
    }

    /// Run `evaluate` on the tokio runtime without waiting for it.
    pub fn spawn_evaluate(&self) -> tokio::task::JoinHandle<Evaluation> {
        let cache = self.clone();
        tokio::spawn(async move { cache.evaluate().await })
    }

    /// Run `refetch` on the tokio runtime without waiting for it.
    pub fn spawn_refetch(&self) -> tokio::task::JoinHandle<Evaluation> {
        let cache = self.clone();
        tokio::spawn(async move { cache.refetch().await })
    }

    async fn run_fetch_sequence(&self) -> Evaluation {
        let inner = &*self.inner;
        let _guard = FetchGuard { inner };

        inner.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        inner.preloader.preload_critical_images();

        let started = Instant::now();
        let result = inner.service.fetch_portfolio_optimized(&inner.locale).await;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        inner.tracker.record(GLOBAL_PORTFOLIO_DATA, elapsed_ms);

        match result {
            Ok(data) => {
                let data = Arc::new(data);
                let now = inner.clock.now_ms();
                inner.state.send_modify(|s| {
                    s.data = Some(Arc::clone(&data));
                    s.last_fetch = now;
                    s.error = None;
                });
                info!(locale = %inner.locale, elapsed_ms = elapsed_ms, "Portfolio data fetched");

                inner.preloader.preload_from_data(&data);
                for section in data.sections() {
                    if section.preloads_images() {
                        inner.preloader.preload_section(section);
                    }
                }
                inner.state.send_modify(|s| s.is_initial_load = false);
                Evaluation::Fetched
            }
            Err(e) => {
                let message = e.to_string();
                error!(error = %message, "Portfolio fetch failed");
                inner.state.send_modify(|s| {
                    s.is_initial_load = false;
                    s.error = Some(message);
                });
                Evaluation::Failed
            }
        }
    }

    /// Project one named section out of the current state. Unknown names and
    /// not-yet-loaded data give `data: None`.
    pub fn section(&self, name: &str) -> SectionData {
        let state = self.inner.state.borrow();
        let data = Section::parse(name)
            .and_then(|section| state.data.as_ref().and_then(|d| d.section(section)));
        SectionData {
            data,
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    /// True while the first load is pending and the progress screen has not
    /// reported completion.
    pub fn should_show_progress(&self) -> bool {
        self.inner.show_progress.load(Ordering::SeqCst) && self.inner.state.borrow().is_initial_load
    }

    /// Progress screen completion. Returns true only for the call that hid it.
    pub fn complete_progress(&self) -> bool {
        self.inner.show_progress.swap(false, Ordering::SeqCst)
    }

    /// Completion callback to hand to a progress indicator.
    pub fn progress_callback(&self) -> Box<dyn FnOnce() + Send + 'static> {
        let cache = self.clone();
        Box::new(move || {
            cache.complete_progress();
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
