use crate::scan_pipeline::domain::FindingsDocument;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// VulnerabilityScanner port for matching an SBOM against vulnerability data
#[async_trait]
pub trait VulnerabilityScanner: Send + Sync {
    /// Scans the SBOM at `sbom`, keeps the raw findings at `output`
    /// and returns them parsed
    ///
    /// # Errors
    /// Returns an error if the scanner exits non-zero or times out,
    /// or if its output is missing, empty or not a findings document
    async fn scan(&self, sbom: &Path, output: &Path) -> Result<FindingsDocument>;
}
