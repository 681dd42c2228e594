//! Application state management for folio.
//!
//! `App` owns the UI state and a `DataContext` holding the portfolio cache.
//! Fetches run on the tokio runtime; the render loop reads the cache through
//! a watch receiver on every tick.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;
use tracing::{debug, info};

use folio_core::preload::{HttpImagePreloader, PreloadSummary};
use folio_core::progress::LoadingProgress;
use folio_core::telemetry::{TracingTracker, GLOBAL_PORTFOLIO_DATA};
use folio_core::{CacheSnapshot, DataContext, PortfolioCache, Section, SectionData};

/// Number of items to move on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 5;

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs, one per portfolio section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    About,
    Awards,
    Education,
    Experience,
    Gallery,
    Organizations,
    Projects,
}

impl Tab {
    pub const ALL: [Tab; 8] = [
        Tab::Home,
        Tab::About,
        Tab::Awards,
        Tab::Education,
        Tab::Experience,
        Tab::Gallery,
        Tab::Organizations,
        Tab::Projects,
    ];

    pub fn section(&self) -> Section {
        match self {
            Tab::Home => Section::Home,
            Tab::About => Section::About,
            Tab::Awards => Section::Awards,
            Tab::Education => Section::Education,
            Tab::Experience => Section::Experience,
            Tab::Gallery => Section::Gallery,
            Tab::Organizations => Section::Organizations,
            Tab::Projects => Section::Projects,
        }
    }

    pub fn title(&self) -> &'static str {
        self.section().title()
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    /// Tab for a 1-based number key.
    pub fn from_number(n: u32) -> Option<Self> {
        let index = usize::try_from(n).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Tabs whose content is a selectable list
    pub fn has_list(&self) -> bool {
        !matches!(self, Tab::Home | Tab::About)
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    pub context: DataContext,
    pub preloader: Option<HttpImagePreloader>,
    pub tracker: Arc<TracingTracker>,

    // UI State
    pub state: AppState,
    pub current_tab: Tab,
    pub selection: usize,
    pub status_message: Option<String>,

    pub progress: LoadingProgress,

    /// Latest cache state, refreshed every tick
    pub snapshot: CacheSnapshot,
    updates: watch::Receiver<CacheSnapshot>,
}

impl App {
    pub fn new(
        context: DataContext,
        preloader: Option<HttpImagePreloader>,
        tracker: Arc<TracingTracker>,
    ) -> Result<Self> {
        let cache = context.global_data()?;
        let progress = LoadingProgress::new(cache.progress_callback());
        let updates = cache.subscribe();
        let snapshot = cache.snapshot();

        Ok(Self {
            context,
            preloader,
            tracker,

            state: AppState::Normal,
            current_tab: Tab::Home,
            selection: 0,
            status_message: None,

            progress,

            snapshot,
            updates,
        })
    }

    fn cache(&self) -> Result<&PortfolioCache> {
        Ok(self.context.global_data()?)
    }

    // =========================================================================
    // Data loading
    // =========================================================================

    /// Evaluate the cache in the background, fetching if it is stale.
    /// Called once when the provider is mounted; later fetches only come from
    /// `refresh`.
    pub fn mount(&mut self) -> Result<()> {
        let cache = self.cache()?;
        if cache.is_stale() {
            debug!("Cache stale at mount, fetching");
        }
        cache.spawn_evaluate();
        Ok(())
    }

    /// Force a refetch in the background. Current data stays on screen.
    pub fn refresh(&mut self) -> Result<()> {
        let cache = self.cache()?;
        if cache.is_fetching() {
            self.status_message = Some("Already refreshing...".to_string());
            return Ok(());
        }
        info!("Manual refresh");
        cache.spawn_refetch();
        self.status_message = None;
        Ok(())
    }

    /// Pull the latest cache state and advance the progress screen.
    pub fn tick(&mut self) {
        if self.updates.has_changed().unwrap_or(false) {
            let latest = self.updates.borrow_and_update().clone();
            if self.snapshot.loading && !latest.loading && latest.error.is_none() {
                self.status_message = None;
            }
            self.snapshot = latest;
            self.clamp_selection();
        }

        // Keep animating after the first load so the completion callback fires
        if !self.progress.is_complete() && self.progress.tick(!self.snapshot.is_initial_load) {
            debug!("Loading screen complete");
        }
    }

    /// True while the loading screen replaces the tabs.
    pub fn showing_progress(&self) -> bool {
        self.cache()
            .map(|c| c.should_show_progress())
            .unwrap_or(false)
    }

    // =========================================================================
    // Section access
    // =========================================================================

    pub fn section(&self, tab: Tab) -> SectionData {
        self.context
            .section(tab.section().key())
            .unwrap_or(SectionData {
                data: None,
                loading: false,
                error: None,
            })
    }

    /// Number of selectable entries on a tab.
    pub fn list_len(&self, tab: Tab) -> usize {
        if !tab.has_list() {
            return 0;
        }
        self.section(tab).data.map(|d| d.len()).unwrap_or(0)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn switch_tab(&mut self, tab: Tab) {
        if tab == self.current_tab {
            return;
        }
        self.current_tab = tab;
        self.selection = 0;
    }

    pub fn select_next(&mut self, step: usize) {
        let len = self.list_len(self.current_tab);
        if len > 0 {
            self.selection = (self.selection + step).min(len - 1);
        }
    }

    pub fn select_prev(&mut self, step: usize) {
        self.selection = self.selection.saturating_sub(step);
    }

    pub fn select_first(&mut self) {
        self.selection = 0;
    }

    pub fn select_last(&mut self) {
        self.selection = self.list_len(self.current_tab).saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.list_len(self.current_tab);
        if self.selection >= len {
            self.selection = len.saturating_sub(1);
        }
    }

    // =========================================================================
    // Status bar
    // =========================================================================

    pub fn last_updated(&self) -> String {
        let now = self.cache().map(|c| c.now_ms()).unwrap_or(0);
        self.snapshot.age_display(now)
    }

    pub fn last_fetch_ms(&self) -> Option<f64> {
        self.tracker
            .last(GLOBAL_PORTFOLIO_DATA)
            .map(|m| m.duration_ms)
    }

    pub fn preload_summary(&self) -> Option<PreloadSummary> {
        self.preloader.as_ref().map(|p| p.summary())
    }

    /// Left side of the status bar.
    pub fn status_text(&self) -> String {
        if let Some(ref msg) = self.status_message {
            return msg.clone();
        }
        if self.snapshot.loading {
            return "Refreshing...".to_string();
        }
        if let Some(ref error) = self.snapshot.error {
            return format!("Error: {}", error);
        }
        let mut text = format!("Updated {}", self.last_updated());
        if let Some(ms) = self.last_fetch_ms() {
            text.push_str(&format!(" in {:.0}ms", ms));
        }
        text
    }
}

// ============================================================================
// Tests
// ============================================================================
