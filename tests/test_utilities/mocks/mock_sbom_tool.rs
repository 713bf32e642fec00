use super::{record, CallLog};
use async_trait::async_trait;
use conspector::prelude::*;
use std::fs;
use std::path::Path;

/// Mock SbomTool writing a minimal SBOM document
pub struct MockSbomTool {
    log: CallLog,
    should_fail: bool,
}

impl MockSbomTool {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            should_fail: false,
        }
    }

    pub fn with_failure(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            should_fail: true,
        }
    }
}

#[async_trait]
impl SbomTool for MockSbomTool {
    async fn generate(&self, checkout: &Path, output: &Path) -> Result<()> {
        record(&self.log, "sbom");
        if self.should_fail {
            anyhow::bail!("syft exited with status 1\nstderr: could not determine source");
        }
        let document = serde_json::json!({
            "source": { "target": checkout },
            "artifacts": [],
        });
        fs::write(output, serde_json::to_string(&document)?)?;
        Ok(())
    }
}
