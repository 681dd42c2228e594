//! Core library for folio.
//!
//! Everything the portfolio viewer needs apart from the terminal UI:
//!
//! - `models`: the portfolio data schema and section names
//! - `service`: the data service trait with HTTP and file backends
//! - `preload`: fire-and-forget image preloading
//! - `telemetry`: performance measurements
//! - `cache`: the global data cache/provider and section accessor
//! - `context`: explicit provider lookup for the view tree
//! - `progress`: the loading-progress indicator
//! - `config`: application configuration

pub mod cache;
pub mod config;
pub mod context;
pub mod models;
pub mod preload;
pub mod progress;
pub mod service;
pub mod telemetry;

pub use cache::{CacheSnapshot, Evaluation, PortfolioCache, SectionData};
pub use config::Config;
pub use context::{ContextError, DataContext};
pub use models::{PortfolioData, Section, SectionValue};
