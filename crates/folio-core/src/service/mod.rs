//! Portfolio data service.
//!
//! The cache treats the service as an opaque collaborator: given a locale it
//! returns the whole `PortfolioData` aggregate or fails with a message.
//!
//! - `HttpPortfolioService`: fetches the aggregate from a REST backend
//! - `FilePortfolioService`: reads a bundled or local JSON document

pub mod client;
pub mod error;
pub mod file;

use async_trait::async_trait;

use crate::models::PortfolioData;

pub use client::HttpPortfolioService;
pub use error::ServiceError;
pub use file::FilePortfolioService;

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en";

#[async_trait]
pub trait PortfolioService: Send + Sync {
    /// Fetch the full portfolio for a locale.
    async fn fetch_portfolio_optimized(&self, locale: &str) -> Result<PortfolioData, ServiceError>;
}
