use async_trait::async_trait;
use conspector::prelude::*;
use std::collections::{HashMap, HashSet};

/// Mock AdvisoryRepository answering from a fixed URL → heading table
///
/// Unknown URLs have no heading.
#[derive(Default)]
pub struct MockAdvisoryRepository {
    headings: HashMap<String, String>,
    failing: HashSet<String>,
}

impl MockAdvisoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heading(mut self, url: &str, heading: &str) -> Self {
        self.headings.insert(url.to_string(), heading.to_string());
        self
    }

    pub fn with_failure(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }
}

#[async_trait]
impl AdvisoryRepository for MockAdvisoryRepository {
    async fn fetch_heading(&self, url: &str) -> Result<Option<String>> {
        if self.failing.contains(url) {
            anyhow::bail!("Mock advisory failure: status code 503");
        }
        Ok(self.headings.get(url).cloned())
    }
}
