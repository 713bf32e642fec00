use crate::ports::outbound::AdvisoryRepository;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Cached result of one advisory fetch; errors are kept as their message
type CachedHeading = std::result::Result<Option<String>, String>;

/// CachingAdvisoryRepository wraps an AdvisoryRepository and adds in-memory caching.
///
/// Each URL is fetched at most once per instance, even when several findings
/// referencing it are enriched concurrently: later callers wait on the first
/// fetch instead of starting their own. Failures are cached as well.
pub struct CachingAdvisoryRepository<R: AdvisoryRepository> {
    inner: R,
    cache: DashMap<String, Arc<OnceCell<CachedHeading>>>,
}

impl<R: AdvisoryRepository> CachingAdvisoryRepository<R> {
    /// Creates a new caching repository wrapping the given inner repository
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<R: AdvisoryRepository> AdvisoryRepository for CachingAdvisoryRepository<R> {
    async fn fetch_heading(&self, url: &str) -> Result<Option<String>> {
        // Clone the cell out so no map guard is held across the await
        let cell = self.cache.entry(url.to_string()).or_default().clone();

        let cached = cell
            .get_or_init(|| async {
                self.inner
                    .fetch_heading(url)
                    .await
                    .map_err(|e| format!("{:#}", e))
            })
            .await;

        cached.clone().map_err(anyhow::Error::msg)
    }
}
