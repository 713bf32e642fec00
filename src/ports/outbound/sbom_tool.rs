use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// SbomTool port for deriving an SBOM from a checkout directory
#[async_trait]
pub trait SbomTool: Send + Sync {
    /// Generates a JSON SBOM for `checkout` at `output`
    ///
    /// # Errors
    /// Returns an error if the tool exits non-zero, times out,
    /// or does not write `output`
    async fn generate(&self, checkout: &Path, output: &Path) -> Result<()>;
}
