//! File-backed portfolio service.
//!
//! Accepts either a single aggregate document or a per-locale map:
//!
//! ```json
//! { "en": { "home": { ... }, ... }, "fr": { ... } }
//! ```
//!
//! A missing locale falls back to the default locale.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::models::{PortfolioData, Section};

use super::{PortfolioService, ServiceError, DEFAULT_LOCALE};

#[derive(Debug, Clone)]
pub struct FilePortfolioService {
    path: PathBuf,
}

impl FilePortfolioService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self, locale: &str) -> Result<PortfolioData, ServiceError> {
        let contents = std::fs::read_to_string(&self.path)?;
        let document: Value = serde_json::from_str(&contents).map_err(|e| {
            ServiceError::InvalidResponse(format!(
                "Failed to parse {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let selected = select_locale(document, locale)?;
        serde_json::from_value(selected)
            .map_err(|e| ServiceError::InvalidResponse(format!("Invalid portfolio data: {}", e)))
    }
}

/// True when the object's keys look like portfolio sections rather than
/// locales. An empty object is an empty aggregate.
fn is_aggregate(map: &serde_json::Map<String, Value>) -> bool {
    map.is_empty() || map.keys().any(|k| Section::parse(k).is_some())
}

fn select_locale(document: Value, locale: &str) -> Result<Value, ServiceError> {
    let Value::Object(mut map) = document else {
        return Err(ServiceError::InvalidResponse(
            "Portfolio document must be a JSON object".to_string(),
        ));
    };

    if is_aggregate(&map) {
        return Ok(Value::Object(map));
    }

    if let Some(value) = map.remove(locale) {
        return Ok(value);
    }

    debug!(locale = locale, fallback = DEFAULT_LOCALE, "Locale missing, using fallback");
    map.remove(DEFAULT_LOCALE)
        .ok_or_else(|| ServiceError::NotFound(format!("No portfolio for locale {}", locale)))
}

#[async_trait]
impl PortfolioService for FilePortfolioService {
    async fn fetch_portfolio_optimized(&self, locale: &str) -> Result<PortfolioData, ServiceError> {
        self.load(locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(contents.as_bytes())
            .expect("Failed to write temp file");
        file
    }

    #[tokio::test]
    async fn test_single_aggregate_ignores_locale() {
        let file = write_temp(r#"{"home": {"name": "Ada"}, "projects": [{"name": "Note G"}]}"#);
        let service = FilePortfolioService::new(file.path());

        let data = service
            .fetch_portfolio_optimized("de")
            .await
            .expect("Failed to load aggregate");
        assert_eq!(data.home.name.as_deref(), Some("Ada"));
        assert_eq!(data.projects.len(), 1);
    }

    #[tokio::test]
    async fn test_locale_map_selects_locale() {
        let file = write_temp(
            r#"{"en": {"home": {"name": "Ada"}}, "fr": {"home": {"name": "Ada (fr)"}}}"#,
        );
        let service = FilePortfolioService::new(file.path());

        let data = service
            .fetch_portfolio_optimized("fr")
            .await
            .expect("Failed to load fr");
        assert_eq!(data.home.name.as_deref(), Some("Ada (fr)"));
    }

    #[tokio::test]
    async fn test_locale_map_falls_back_to_default() {
        let file = write_temp(r#"{"en": {"home": {"name": "Ada"}}}"#);
        let service = FilePortfolioService::new(file.path());

        let data = service
            .fetch_portfolio_optimized("es")
            .await
            .expect("Failed to fall back");
        assert_eq!(data.home.name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_locale_map_without_default_is_not_found() {
        let file = write_temp(r#"{"fr": {"home": {"name": "Ada"}}}"#);
        let service = FilePortfolioService::new(file.path());

        let result = service.fetch_portfolio_optimized("es").await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_document_is_empty_portfolio() {
        let file = write_temp("{}");
        let service = FilePortfolioService::new(file.path());

        let data = service
            .fetch_portfolio_optimized("fr")
            .await
            .expect("Empty document should load");
        assert_eq!(data, PortfolioData::default());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let service = FilePortfolioService::new("/definitely/not/here.json");
        let result = service.fetch_portfolio_optimized("en").await;
        assert!(matches!(result, Err(ServiceError::Io(_))));
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_response() {
        let file = write_temp("{ not json");
        let service = FilePortfolioService::new(file.path());
        let result = service.fetch_portfolio_optimized("en").await;
        assert!(matches!(result, Err(ServiceError::InvalidResponse(_))));
    }
}
