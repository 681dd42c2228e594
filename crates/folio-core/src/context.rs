//! Explicit provider lookup for the view tree.
//!
//! The composition root mounts one `PortfolioCache` into a `DataContext` and
//! passes the context down. Looking the cache up from a context with nothing
//! mounted is an error rather than a silent default.

use thiserror::Error;

use crate::cache::{CacheSnapshot, PortfolioCache, SectionData};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("global data accessed outside of a data provider")]
    NoProvider,
}

#[derive(Clone, Default)]
pub struct DataContext {
    provider: Option<PortfolioCache>,
}

impl DataContext {
    /// A context with no provider mounted.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(cache: PortfolioCache) -> Self {
        Self {
            provider: Some(cache),
        }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn global_data(&self) -> Result<&PortfolioCache, ContextError> {
        self.provider.as_ref().ok_or(ContextError::NoProvider)
    }

    pub fn snapshot(&self) -> Result<CacheSnapshot, ContextError> {
        Ok(self.global_data()?.snapshot())
    }

    pub fn section(&self, name: &str) -> Result<SectionData, ContextError> {
        Ok(self.global_data()?.section(name))
    }
}
