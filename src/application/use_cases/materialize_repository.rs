use crate::ports::outbound::{ProgressReporter, RepositoryCloner};
use crate::scan_pipeline::domain::RunIdentity;
use crate::shared::error::PipelineError;
use crate::shared::security::{validate_not_symlink, validate_staging_root};
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Local checkout of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedCheckout {
    pub staging_path: PathBuf,
    pub checkout_path: PathBuf,
    /// The checkout already existed and was not cloned again
    pub reused: bool,
}

/// RepositoryMaterializer - turns a run identity into a checkout on disk
///
/// Calling it twice for the same run clones at most once: an existing
/// checkout directory is reused as is.
pub struct RepositoryMaterializer<CL> {
    cloner: CL,
}

impl<CL: RepositoryCloner> RepositoryMaterializer<CL> {
    pub fn new(cloner: CL) -> Self {
        Self { cloner }
    }

    /// Ensures the checkout of `run` exists under `staging_root`
    ///
    /// # Errors
    /// Fails when the staging root is unusable, the staging directory cannot
    /// be created, the existing checkout is not a real directory, or the clone fails
    pub async fn materialize<PR: ProgressReporter>(
        &self,
        run: &RunIdentity,
        staging_root: &Path,
        reporter: &PR,
    ) -> Result<MaterializedCheckout> {
        // Nothing may touch the filesystem before the root is validated
        validate_staging_root(staging_root)?;

        let staging_path = run.staging_path(staging_root);
        fs::create_dir_all(&staging_path).map_err(|e| PipelineError::FileWriteError {
            path: staging_path.clone(),
            details: format!("Failed to create staging directory: {}", e),
        })?;

        let checkout_path = run.checkout_path(staging_root);
        if fs::symlink_metadata(&checkout_path).is_ok() {
            validate_not_symlink(&checkout_path, "checkout reuse")?;
            if !checkout_path.is_dir() {
                anyhow::bail!(
                    "Existing checkout path {} is not a directory",
                    checkout_path.display()
                );
            }
            reporter.report(&format!(
                "♻️  Reusing existing checkout: {}",
                checkout_path.display()
            ));
            return Ok(MaterializedCheckout {
                staging_path,
                checkout_path,
                reused: true,
            });
        }

        reporter.report(&format!(
            "📥 Cloning {} (branch {})...",
            run.locator().clone_url(),
            run.branch()
        ));
        self.cloner
            .shallow_clone(run.locator().clone_url(), run.branch(), &checkout_path)
            .await?;
        reporter.report(&format!("✅ Checked out into {}", checkout_path.display()));

        Ok(MaterializedCheckout {
            staging_path,
            checkout_path,
            reused: false,
        })
    }
}
