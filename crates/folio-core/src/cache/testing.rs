//! Test doubles for the cache's collaborators.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::models::{PortfolioData, Section};
use crate::preload::ImagePreloader;
use crate::service::{PortfolioService, ServiceError};
use crate::telemetry::PerformanceTracker;

/// Shared, ordered record of collaborator calls.
#[derive(Clone, Default)]
pub(crate) struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub(crate) fn push(&self, event: impl Into<String>) {
        self.0.lock().expect("event log poisoned").push(event.into());
    }

    pub(crate) fn events(&self) -> Vec<String> {
        self.0.lock().expect("event log poisoned").clone()
    }
}

/// One scripted service response.
pub(crate) struct Step {
    result: Result<PortfolioData, String>,
    delay: Option<Duration>,
    gate: Option<Arc<Notify>>,
}

impl Step {
    pub(crate) fn ok(data: PortfolioData) -> Self {
        Self {
            result: Ok(data),
            delay: None,
            gate: None,
        }
    }

    pub(crate) fn err(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            delay: None,
            gate: None,
        }
    }

    pub(crate) fn delay_ms(mut self, ms: u64) -> Self {
        self.delay = Some(Duration::from_millis(ms));
        self
    }

    /// Hold the response until the gate is notified.
    pub(crate) fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

pub(crate) struct FakeService {
    steps: Mutex<VecDeque<Step>>,
    calls: AtomicUsize,
    log: EventLog,
}

impl FakeService {
    pub(crate) fn new(steps: Vec<Step>, log: EventLog) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            calls: AtomicUsize::new(0),
            log,
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PortfolioService for FakeService {
    async fn fetch_portfolio_optimized(&self, locale: &str) -> Result<PortfolioData, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.push(format!("fetch:{}", locale));

        let step = self
            .steps
            .lock()
            .expect("script poisoned")
            .pop_front()
            .expect("service called more times than scripted");

        if let Some(delay) = step.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(gate) = step.gate {
            gate.notified().await;
        }
        step.result.map_err(ServiceError::ServerError)
    }
}

pub(crate) struct RecordingPreloader {
    log: EventLog,
}

impl RecordingPreloader {
    pub(crate) fn new(log: EventLog) -> Self {
        Self { log }
    }
}

impl ImagePreloader for RecordingPreloader {
    fn preload_critical_images(&self) {
        self.log.push("critical");
    }

    fn preload_from_data(&self, _data: &PortfolioData) {
        self.log.push("from_data");
    }

    fn preload_section(&self, section: Section) {
        self.log.push(format!("section:{}", section.key()));
    }
}

#[derive(Default)]
pub(crate) struct RecordingTracker {
    recorded: Mutex<Vec<(String, f64)>>,
}

impl RecordingTracker {
    pub(crate) fn recorded(&self) -> Vec<(String, f64)> {
        self.recorded.lock().expect("tracker poisoned").clone()
    }
}

impl PerformanceTracker for RecordingTracker {
    fn record(&self, name: &str, duration_ms: f64) {
        self.recorded
            .lock()
            .expect("tracker poisoned")
            .push((name.to_string(), duration_ms));
    }
}

/// Yield to other tasks until `condition` holds.
pub(crate) async fn wait_until(condition: impl Fn() -> bool) {
    for _ in 0..1_000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
