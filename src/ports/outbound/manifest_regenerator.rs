use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// ManifestRegenerator port for rebuilding a missing or invalid dependency manifest
///
/// The two methods are the two fallbacks of the manifest chain, tried in order:
/// static inference from the checkout's source imports, then a snapshot of the
/// packages installed on the host.
#[async_trait]
pub trait ManifestRegenerator: Send + Sync {
    /// Infers dependencies from source imports under `checkout` and writes them to `manifest`
    async fn infer_from_sources(&self, checkout: &Path, manifest: &Path) -> Result<()>;

    /// Writes the host environment's installed-package snapshot to `manifest`
    async fn snapshot_environment(&self, manifest: &Path) -> Result<()>;
}
