use super::{record, CallLog};
use async_trait::async_trait;
use conspector::prelude::*;
use std::fs;
use std::path::Path;

/// Mock VulnerabilityScanner returning a fixed findings document
pub struct MockVulnerabilityScanner {
    log: CallLog,
    findings_json: String,
}

impl MockVulnerabilityScanner {
    pub fn new(log: &CallLog, findings_json: &str) -> Self {
        Self {
            log: log.clone(),
            findings_json: findings_json.to_string(),
        }
    }
}

#[async_trait]
impl VulnerabilityScanner for MockVulnerabilityScanner {
    async fn scan(&self, sbom: &Path, output: &Path) -> Result<FindingsDocument> {
        record(&self.log, "scan");
        if !sbom.is_file() {
            anyhow::bail!("SBOM {} does not exist", sbom.display());
        }
        fs::write(output, &self.findings_json)?;
        FindingsDocument::from_json(&self.findings_json)
    }
}
