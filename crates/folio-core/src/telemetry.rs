//! Performance measurements.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tracing::info;

/// Label used for the global portfolio fetch.
pub const GLOBAL_PORTFOLIO_DATA: &str = "global_portfolio_data";

/// Number of measurements kept by `TracingTracker`.
const MAX_RETAINED_MEASUREMENTS: usize = 32;

pub trait PerformanceTracker: Send + Sync {
    /// Record a named duration. Nothing is returned to the caller.
    fn record(&self, name: &str, duration_ms: f64);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub name: String,
    pub duration_ms: f64,
    pub recorded_at: DateTime<Utc>,
}

/// Logs each measurement and keeps the most recent ones in memory.
#[derive(Debug, Default)]
pub struct TracingTracker {
    recent: Mutex<VecDeque<Measurement>>,
}

impl TracingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent measurement with the given name.
    pub fn last(&self, name: &str) -> Option<Measurement> {
        let recent = self.recent.lock().unwrap_or_else(|p| p.into_inner());
        recent.iter().rev().find(|m| m.name == name).cloned()
    }
}

impl PerformanceTracker for TracingTracker {
    fn record(&self, name: &str, duration_ms: f64) {
        info!(measurement = name, duration_ms = duration_ms, "Performance measurement");

        let mut recent = self.recent.lock().unwrap_or_else(|p| p.into_inner());
        if recent.len() >= MAX_RETAINED_MEASUREMENTS {
            recent.pop_front();
        }
        recent.push_back(Measurement {
            name: name.to_string(),
            duration_ms,
            recorded_at: Utc::now(),
        });
    }
}
