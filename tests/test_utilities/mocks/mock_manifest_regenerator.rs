use super::{record, CallLog};
use async_trait::async_trait;
use conspector::prelude::*;
use std::fs;
use std::path::Path;

/// Mock ManifestRegenerator
///
/// `None` makes the corresponding fallback fail; `Some(content)` writes
/// `content` to the manifest.
pub struct MockManifestRegenerator {
    log: CallLog,
    inferred: Option<String>,
    snapshot: Option<String>,
}

impl MockManifestRegenerator {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            inferred: None,
            snapshot: None,
        }
    }

    pub fn with_inferred(mut self, content: &str) -> Self {
        self.inferred = Some(content.to_string());
        self
    }

    pub fn with_snapshot(mut self, content: &str) -> Self {
        self.snapshot = Some(content.to_string());
        self
    }
}

#[async_trait]
impl ManifestRegenerator for MockManifestRegenerator {
    async fn infer_from_sources(&self, _checkout: &Path, manifest: &Path) -> Result<()> {
        record(&self.log, "infer");
        match &self.inferred {
            Some(content) => Ok(fs::write(manifest, content)?),
            None => anyhow::bail!("pipreqs exited with status 1"),
        }
    }

    async fn snapshot_environment(&self, manifest: &Path) -> Result<()> {
        record(&self.log, "snapshot");
        match &self.snapshot {
            Some(content) => Ok(fs::write(manifest, content)?),
            None => anyhow::bail!("pip exited with status 1"),
        }
    }
}
