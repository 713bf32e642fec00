use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// RepositoryCloner port for materializing a branch on disk
///
/// This port abstracts the version-control client used to fetch
/// a single branch of a remote repository into a local directory.
#[async_trait]
pub trait RepositoryCloner: Send + Sync {
    /// Performs a shallow, single-branch clone of `branch` into `target`
    ///
    /// # Arguments
    /// * `clone_url` - Canonical clone URL (browse suffixes already stripped)
    /// * `branch` - Branch to check out
    /// * `target` - Directory to clone into; must not exist yet
    ///
    /// # Errors
    /// Returns an error if the client cannot be started, exits non-zero,
    /// or does not finish within its timeout
    async fn shallow_clone(&self, clone_url: &str, branch: &str, target: &Path) -> Result<()>;
}
