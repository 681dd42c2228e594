use std::sync::Arc;

use crate::models::PortfolioData;

/// What every consumer of the cache sees.
///
/// `loading` is true only while a fetch sequence is in flight.
/// `is_initial_load` flips to false once, when the first fetch finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSnapshot {
    pub data: Option<Arc<PortfolioData>>,
    pub loading: bool,
    pub error: Option<String>,
    /// Epoch milliseconds of the last successful fetch, 0 = never.
    pub last_fetch: i64,
    pub is_initial_load: bool,
}

impl Default for CacheSnapshot {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            last_fetch: 0,
            is_initial_load: true,
        }
    }
}

impl CacheSnapshot {
    /// Stale when nothing is cached or the last fetch is older than `cache_duration_ms`.
    pub fn is_stale(&self, now_ms: i64, cache_duration_ms: i64) -> bool {
        self.data.is_none() || now_ms - self.last_fetch > cache_duration_ms
    }

    pub fn age_minutes(&self, now_ms: i64) -> Option<i64> {
        if self.last_fetch == 0 {
            return None;
        }
        Some((now_ms - self.last_fetch) / 60_000)
    }

    pub fn age_display(&self, now_ms: i64) -> String {
        let Some(minutes) = self.age_minutes(now_ms) else {
            return "never".to_string();
        };
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            if minutes % 60 >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: i64 = 60_000;

    fn loaded(last_fetch: i64) -> CacheSnapshot {
        CacheSnapshot {
            data: Some(Arc::new(PortfolioData::default())),
            last_fetch,
            is_initial_load: false,
            ..CacheSnapshot::default()
        }
    }

    #[test]
    fn test_default_is_initial_and_empty() {
        let s = CacheSnapshot::default();
        assert!(s.data.is_none());
        assert!(!s.loading);
        assert_eq!(s.last_fetch, 0);
        assert!(s.is_initial_load);
    }

    #[test]
    fn test_absent_data_is_stale() {
        let s = CacheSnapshot {
            last_fetch: 1_000,
            ..CacheSnapshot::default()
        };
        assert!(s.is_stale(1_000, 30 * MINUTE));
    }

    #[test]
    fn test_staleness_boundary() {
        let s = loaded(1_000);
        assert!(!s.is_stale(1_000 + 30 * MINUTE, 30 * MINUTE));
        assert!(s.is_stale(1_000 + 30 * MINUTE + 1, 30 * MINUTE));
    }

    #[test]
    fn test_reset_timestamp_is_stale() {
        let s = loaded(0);
        assert!(s.is_stale(10 * MINUTE, 30 * MINUTE));
    }

    #[test]
    fn test_age_display() {
        assert_eq!(CacheSnapshot::default().age_display(5 * MINUTE), "never");
        assert_eq!(loaded(MINUTE).age_display(MINUTE + 10), "just now");
        assert_eq!(loaded(MINUTE).age_display(6 * MINUTE), "5m ago");
        assert_eq!(loaded(MINUTE).age_display(MINUTE + 95 * MINUTE), "2h ago");
        assert_eq!(loaded(MINUTE).age_display(MINUTE + 3 * 1440 * MINUTE), "3d ago");
    }
}
