use super::CommandRunner;
use crate::adapters::outbound::filesystem::FileSystemWriter;
use crate::ports::outbound::ManifestRegenerator;
use crate::shared::Result;
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::Path;

/// PipreqsManifestRegenerator adapter rebuilding `requirements.txt`
///
/// Inference runs `pipreqs` over the checkout's imports. The environment
/// snapshot runs `pip freeze` and writes its stdout atomically, so a failed
/// snapshot never leaves a truncated manifest behind.
pub struct PipreqsManifestRegenerator {
    pipreqs_path: String,
    pip_path: String,
    runner: CommandRunner,
    writer: FileSystemWriter,
}

impl PipreqsManifestRegenerator {
    pub fn new(
        pipreqs_path: impl Into<String>,
        pip_path: impl Into<String>,
        runner: CommandRunner,
    ) -> Self {
        Self {
            pipreqs_path: pipreqs_path.into(),
            pip_path: pip_path.into(),
            runner,
            writer: FileSystemWriter::new(),
        }
    }
}

#[async_trait]
impl ManifestRegenerator for PipreqsManifestRegenerator {
    async fn infer_from_sources(&self, checkout: &Path, manifest: &Path) -> Result<()> {
        let args = [
            OsStr::new("--force"),
            OsStr::new("--savepath"),
            manifest.as_os_str(),
            checkout.as_os_str(),
        ];
        self.runner.run(&self.pipreqs_path, args).await?;
        Ok(())
    }

    async fn snapshot_environment(&self, manifest: &Path) -> Result<()> {
        let output = self.runner.run(&self.pip_path, ["freeze"]).await?;
        self.writer.write_atomic(manifest, &output.stdout)
    }
}
