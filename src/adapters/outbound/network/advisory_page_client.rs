use crate::ports::outbound::AdvisoryRepository;
use crate::shared::security::validate_http_url;
use crate::shared::Result;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title(?:\s[^>]*)?>(.*?)</title\s*>").expect("title pattern is a valid regex")
});
static H1_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h1(?:\s[^>]*)?>(.*?)</h1\s*>").expect("h1 pattern is a valid regex")
});
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is a valid regex"));

/// AdvisoryPageClient adapter fetching advisory HTML pages over HTTP
///
/// Only the page headline is extracted: the `<title>` element, or the first
/// `<h1>` when the title is missing or blank.
pub struct AdvisoryPageClient {
    client: reqwest::Client,
    max_retries: u32,
}

impl AdvisoryPageClient {
    /// Creates a new advisory client with default configuration
    pub fn new() -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("conspector/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            max_retries: 3,
        })
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<String> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.fetch_page(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("No request was attempted for {}", url)))
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("Advisory page {} returned status code {}", url, response.status());
        }

        Ok(response.text().await?)
    }

    /// Extracts the page headline from raw HTML
    pub fn extract_heading(html: &str) -> Option<String> {
        [&*TITLE_PATTERN, &*H1_PATTERN]
            .into_iter()
            .filter_map(|pattern| pattern.captures(html))
            .filter_map(|captures| captures.get(1))
            .map(|inner| collapse_whitespace(&TAG_PATTERN.replace_all(inner.as_str(), " ")))
            .find(|text| !text.is_empty())
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl AdvisoryRepository for AdvisoryPageClient {
    async fn fetch_heading(&self, url: &str) -> Result<Option<String>> {
        validate_http_url(url)?;
        let body = self.fetch_with_retry(url).await?;
        Ok(Self::extract_heading(&body))
    }
}
