use super::CommandRunner;
use crate::ports::outbound::SbomTool;
use crate::shared::error::ToolError;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// SyftSbomTool adapter generating syft-json SBOMs from a directory
pub struct SyftSbomTool {
    syft_path: String,
    runner: CommandRunner,
}

impl SyftSbomTool {
    pub fn new(syft_path: impl Into<String>, runner: CommandRunner) -> Self {
        Self {
            syft_path: syft_path.into(),
            runner,
        }
    }
}

#[async_trait]
impl SbomTool for SyftSbomTool {
    async fn generate(&self, checkout: &Path, output: &Path) -> Result<()> {
        let args = [
            "scan".to_string(),
            format!("dir:{}", checkout.display()),
            "-o".to_string(),
            format!("syft-json={}", output.display()),
        ];
        self.runner.run(&self.syft_path, args).await?;

        if !output.is_file() {
            return Err(ToolError::MissingOutput {
                tool: self.syft_path.clone(),
                path: output.to_path_buf(),
            }
            .into());
        }
        Ok(())
    }
}
