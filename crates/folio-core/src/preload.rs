//! Fire-and-forget image preloading.
//!
//! The cache only ever submits work here; nothing is awaited and no outcome
//! flows back into the cache state. `HttpImagePreloader` warms images by
//! downloading them on the tokio runtime and keeps a per-URL status table the
//! UI can report on.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::{debug, warn};

use crate::models::{PortfolioData, Section};

/// Image download timeout in seconds.
const IMAGE_TIMEOUT_SECS: u64 = 15;

/// Default number of images downloaded at once.
pub const DEFAULT_MAX_CONCURRENT_PRELOADS: usize = 4;

pub trait ImagePreloader: Send + Sync {
    /// Start preloading the configured above-the-fold images.
    fn preload_critical_images(&self);

    /// Start preloading the images referenced anywhere in `data`.
    fn preload_from_data(&self, data: &PortfolioData);

    /// Start preloading the images of one section.
    fn preload_section(&self, section: Section);
}

/// Preloader that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPreloader;

impl ImagePreloader for NoopPreloader {
    fn preload_critical_images(&self) {}
    fn preload_from_data(&self, _data: &PortfolioData) {}
    fn preload_section(&self, _section: Section) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreloadStatus {
    Pending,
    Loaded { bytes: usize },
    Failed(String),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PreloadSummary {
    pub pending: usize,
    pub loaded: usize,
    pub failed: usize,
}

impl PreloadSummary {
    pub fn total(&self) -> usize {
        self.pending + self.loaded + self.failed
    }
}

struct PreloaderInner {
    client: Client,
    critical: Vec<String>,
    max_concurrent: usize,
    /// Section image URLs from the last scanned aggregate
    index: Mutex<HashMap<Section, Vec<String>>>,
    status: Mutex<HashMap<String, PreloadStatus>>,
}

/// Downloads images in the background with bounded concurrency.
/// Clone is cheap and shares the status table.
#[derive(Clone)]
pub struct HttpImagePreloader {
    inner: Arc<PreloaderInner>,
}

impl HttpImagePreloader {
    pub fn new(critical: Vec<String>, max_concurrent: usize) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(IMAGE_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            inner: Arc::new(PreloaderInner {
                client,
                critical,
                max_concurrent: max_concurrent.max(1),
                index: Mutex::new(HashMap::new()),
                status: Mutex::new(HashMap::new()),
            }),
        })
    }

    pub fn status(&self, url: &str) -> Option<PreloadStatus> {
        lock(&self.inner.status).get(url).cloned()
    }

    pub fn summary(&self) -> PreloadSummary {
        let status = lock(&self.inner.status);
        let mut summary = PreloadSummary::default();
        for s in status.values() {
            match s {
                PreloadStatus::Pending => summary.pending += 1,
                PreloadStatus::Loaded { .. } => summary.loaded += 1,
                PreloadStatus::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// URLs indexed for a section by the last `preload_from_data`.
    pub fn indexed(&self, section: Section) -> Vec<String> {
        lock(&self.inner.index)
            .get(&section)
            .cloned()
            .unwrap_or_default()
    }

    /// Queue URLs that are not already pending or loaded. Failed URLs are retried.
    fn submit(&self, urls: Vec<String>) {
        let fresh: Vec<String> = {
            let mut status = lock(&self.inner.status);
            urls.into_iter()
                .filter(|url| {
                    let queue = !matches!(
                        status.get(url),
                        Some(PreloadStatus::Pending | PreloadStatus::Loaded { .. })
                    );
                    if queue {
                        status.insert(url.clone(), PreloadStatus::Pending);
                    }
                    queue
                })
                .collect()
        };

        if fresh.is_empty() {
            return;
        }

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!(count = fresh.len(), "No async runtime, skipping image preload");
                let mut status = lock(&self.inner.status);
                for url in fresh {
                    status.insert(url, PreloadStatus::Failed("no async runtime".to_string()));
                }
                return;
            }
        };

        debug!(count = fresh.len(), "Preloading images");
        let inner = Arc::clone(&self.inner);
        handle.spawn(async move {
            let max = inner.max_concurrent;
            // Each status is written as soon as its download settles
            stream::iter(fresh)
                .for_each_concurrent(max, |url| {
                    let inner = Arc::clone(&inner);
                    async move {
                        let result = fetch_image(&inner.client, &url).await;
                        if let PreloadStatus::Failed(ref reason) = result {
                            debug!(url = %url, reason = %reason, "Image preload failed");
                        }
                        lock(&inner.status).insert(url, result);
                    }
                })
                .await;
        });
    }
}

async fn fetch_image(client: &Client, url: &str) -> PreloadStatus {
    let response = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => return PreloadStatus::Failed(e.to_string()),
    };
    if !response.status().is_success() {
        return PreloadStatus::Failed(format!("Status {}", response.status()));
    }
    match response.bytes().await {
        Ok(bytes) => PreloadStatus::Loaded { bytes: bytes.len() },
        Err(e) => PreloadStatus::Failed(e.to_string()),
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ImagePreloader for HttpImagePreloader {
    fn preload_critical_images(&self) {
        self.submit(self.inner.critical.clone());
    }

    fn preload_from_data(&self, data: &PortfolioData) {
        let mut index: HashMap<Section, Vec<String>> = HashMap::new();
        for (section, url) in data.image_urls() {
            index.entry(section).or_default().push(url);
        }

        // Sections skipped by the per-section pass are warmed here
        let eager: Vec<String> = Section::PRELOAD_EXCLUDED
            .iter()
            .filter_map(|s| index.get(s))
            .flatten()
            .cloned()
            .collect();

        *lock(&self.inner.index) = index;
        self.submit(eager);
    }

    fn preload_section(&self, section: Section) {
        let urls = self.indexed(section);
        self.submit(urls);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::portfolio::tests::sample_portfolio;

    const UNREACHABLE: &str = "http://127.0.0.1:9/critical.png";

    #[tokio::test]
    async fn test_from_data_indexes_sections_and_warms_home() {
        let preloader = HttpImagePreloader::new(vec![], 2).expect("Failed to build preloader");
        preloader.preload_from_data(&sample_portfolio());

        assert_eq!(
            preloader.indexed(Section::Projects),
            vec!["https://img.example/note-g.png".to_string()]
        );
        assert_eq!(
            preloader.status("https://img.example/avatar.png"),
            Some(PreloadStatus::Pending)
        );
        // Projects are left for the per-section pass
        assert_eq!(preloader.status("https://img.example/note-g.png"), None);
    }

    #[tokio::test]
    async fn test_section_preload_is_deduplicated() {
        let preloader = HttpImagePreloader::new(vec![], 2).expect("Failed to build preloader");
        preloader.preload_from_data(&sample_portfolio());

        preloader.preload_section(Section::Projects);
        preloader.preload_section(Section::Projects);

        let summary = preloader.summary();
        assert_eq!(summary.pending, 2);
        assert_eq!(summary.total(), 2);
    }

    #[tokio::test]
    async fn test_unknown_section_index_is_empty() {
        let preloader = HttpImagePreloader::new(vec![], 2).expect("Failed to build preloader");
        preloader.preload_section(Section::Gallery);
        assert_eq!(preloader.summary().total(), 0);
    }

    #[tokio::test]
    async fn test_critical_image_failure_is_recorded() {
        let preloader = HttpImagePreloader::new(vec![UNREACHABLE.to_string()], 1)
            .expect("Failed to build preloader");
        preloader.preload_critical_images();
        assert_eq!(preloader.status(UNREACHABLE), Some(PreloadStatus::Pending));

        for _ in 0..200 {
            if matches!(preloader.status(UNREACHABLE), Some(PreloadStatus::Failed(_))) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        assert!(matches!(
            preloader.status(UNREACHABLE),
            Some(PreloadStatus::Failed(_))
        ));
    }

    /// Serve `/slow.png` after a long delay and anything else at once.
    async fn image_server() -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("No local address");
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]);
                    if request.starts_with("GET /slow.png") {
                        tokio::time::sleep(Duration::from_secs(10)).await;
                    }
                    let _ = socket
                        .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 3\r\nConnection: close\r\n\r\nabc")
                        .await;
                });
            }
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_status_recorded_before_slow_image_finishes() {
        let base = image_server().await;
        let fast = format!("{}/fast.png", base);
        let slow = format!("{}/slow.png", base);
        let preloader = HttpImagePreloader::new(vec![slow.clone(), fast.clone()], 2)
            .expect("Failed to build preloader");

        preloader.preload_critical_images();

        for _ in 0..200 {
            if preloader.status(&fast) != Some(PreloadStatus::Pending) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        assert_eq!(preloader.status(&fast), Some(PreloadStatus::Loaded { bytes: 3 }));
        assert_eq!(preloader.status(&slow), Some(PreloadStatus::Pending));

        let summary = preloader.summary();
        assert_eq!(summary.loaded, 1);
        assert_eq!(summary.pending, 1);
    }

    #[test]
    fn test_submit_without_runtime_marks_failed() {
        let preloader = HttpImagePreloader::new(vec![UNREACHABLE.to_string()], 1)
            .expect("Failed to build preloader");
        preloader.preload_critical_images();
        assert_eq!(
            preloader.status(UNREACHABLE),
            Some(PreloadStatus::Failed("no async runtime".to_string()))
        );
    }
}
