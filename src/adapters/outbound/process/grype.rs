use super::CommandRunner;
use crate::adapters::outbound::filesystem::FileSystemReader;
use crate::ports::outbound::VulnerabilityScanner;
use crate::scan_pipeline::domain::FindingsDocument;
use crate::shared::error::ToolError;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::path::Path;

/// GrypeScanner adapter scanning an SBOM into a CycloneDX findings document
pub struct GrypeScanner {
    grype_path: String,
    runner: CommandRunner,
    reader: FileSystemReader,
}

impl GrypeScanner {
    pub fn new(grype_path: impl Into<String>, runner: CommandRunner) -> Self {
        Self {
            grype_path: grype_path.into(),
            runner,
            reader: FileSystemReader::new(),
        }
    }
}

#[async_trait]
impl VulnerabilityScanner for GrypeScanner {
    async fn scan(&self, sbom: &Path, output: &Path) -> Result<FindingsDocument> {
        let args = [
            format!("sbom:{}", sbom.display()),
            "-o".to_string(),
            "cyclonedx-json".to_string(),
            "--file".to_string(),
            output.display().to_string(),
        ];
        self.runner.run(&self.grype_path, args).await?;

        if !output.is_file() {
            return Err(ToolError::MissingOutput {
                tool: self.grype_path.clone(),
                path: output.to_path_buf(),
            }
            .into());
        }

        let content = self.reader.read_text(output, "findings document")?;
        FindingsDocument::from_json(&content)
            .with_context(|| format!("Failed to parse findings document {}", output.display()))
    }
}
