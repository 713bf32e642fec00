use crate::shared::Result;
use async_trait::async_trait;

/// AdvisoryRepository port for reading advisory pages
///
/// The enricher only needs the page's headline: that is where advisory
/// databases put the CVE identifier a finding maps to.
#[async_trait]
pub trait AdvisoryRepository: Send + Sync {
    /// Fetches the page at `url` and returns its title (or first heading)
    ///
    /// # Returns
    /// `None` when the page has neither a title nor a heading
    ///
    /// # Errors
    /// Returns an error if the URL is rejected, the request fails
    /// or the server answers with a non-success status
    async fn fetch_heading(&self, url: &str) -> Result<Option<String>>;
}
