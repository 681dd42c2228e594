//! Loading-progress indicator shown before the first load finishes.
//!
//! Progress is simulated: it creeps toward `LOADING_CEILING` while the load is
//! outstanding and runs to 100 once it finishes. Reaching 100 fires the
//! completion callback, exactly once.

/// Progress never passes this while the load is still outstanding.
const LOADING_CEILING: f64 = 90.0;

/// Fraction of the remaining distance to the ceiling covered per tick.
const CREEP_RATE: f64 = 0.08;

/// Percentage added per tick once the load has finished.
const FINISH_STEP: f64 = 25.0;

pub struct LoadingProgress {
    percent: f64,
    on_complete: Option<Box<dyn FnOnce() + Send>>,
}

impl LoadingProgress {
    pub fn new(on_complete: Box<dyn FnOnce() + Send>) -> Self {
        Self {
            percent: 0.0,
            on_complete: Some(on_complete),
        }
    }

    /// Advance one frame. Returns true on the tick that completed the indicator.
    pub fn tick(&mut self, finished: bool) -> bool {
        if self.is_complete() {
            return false;
        }

        if finished {
            self.percent = (self.percent + FINISH_STEP).min(100.0);
        } else {
            let step = (LOADING_CEILING - self.percent) * CREEP_RATE;
            self.percent = (self.percent + step).min(LOADING_CEILING);
        }

        if self.percent >= 100.0 {
            if let Some(callback) = self.on_complete.take() {
                callback();
            }
            return true;
        }
        false
    }

    pub fn percent(&self) -> u16 {
        self.percent.round() as u16
    }

    pub fn ratio(&self) -> f64 {
        (self.percent / 100.0).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.on_complete.is_none()
    }

    pub fn label(&self) -> &'static str {
        match self.percent() {
            0..=29 => "Connecting...",
            30..=74 => "Fetching portfolio...",
            75..=99 => "Preparing images...",
            _ => "Ready",
        }
    }
}

impl std::fmt::Debug for LoadingProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingProgress")
            .field("percent", &self.percent)
            .field("complete", &self.is_complete())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting() -> (LoadingProgress, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let progress = LoadingProgress::new(Box::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        (progress, count)
    }

    #[test]
    fn test_never_completes_while_loading() {
        let (mut progress, count) = counting();
        for _ in 0..500 {
            assert!(!progress.tick(false));
        }
        assert!(progress.percent() <= 90);
        assert!(progress.percent() >= 85);
        assert!(!progress.is_complete());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_completes_once_after_finish() {
        let (mut progress, count) = counting();
        progress.tick(false);

        let completions = (0..10).filter(|_| progress.tick(true)).count();
        assert_eq!(completions, 1);
        assert_eq!(progress.percent(), 100);
        assert_eq!(progress.label(), "Ready");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_finish_from_zero_takes_four_ticks() {
        let (mut progress, _) = counting();
        assert!(!progress.tick(true));
        assert!(!progress.tick(true));
        assert!(!progress.tick(true));
        assert!(progress.tick(true));
    }

    #[test]
    fn test_label_follows_phase() {
        let (mut progress, _) = counting();
        assert_eq!(progress.label(), "Connecting...");
        progress.tick(true);
        progress.tick(true);
        assert_eq!(progress.label(), "Fetching portfolio...");
        progress.tick(true);
        assert_eq!(progress.label(), "Preparing images...");
    }
}
