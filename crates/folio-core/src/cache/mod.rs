//! Global portfolio data cache.
//!
//! `PortfolioCache` fetches the portfolio once, serves it for 30 minutes,
//! and kicks off image preloading around each fetch. State is in memory only
//! and lives as long as the cache handle; each instance is independent.
//!
//! - `clock`: wall-clock source used for cache timestamps
//! - `state`: the `CacheSnapshot` consumers read
//! - `provider`: fetch orchestration, staleness, progress gate, section accessor

pub mod clock;
pub mod provider;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use clock::{Clock, ManualClock, SystemClock};
pub use provider::{Evaluation, PortfolioCache, PortfolioCacheBuilder, SectionData};
pub use state::CacheSnapshot;
