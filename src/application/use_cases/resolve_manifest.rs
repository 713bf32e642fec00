use crate::ports::outbound::{ManifestRegenerator, ProgressReporter};
use crate::scan_pipeline::domain::{
    ManifestResolution, ManifestState, StageOutcome, MANIFEST_FILE_NAME,
};
use std::fs;
use std::path::Path;

/// ManifestResolver - makes sure the checkout has a usable `requirements.txt`
///
/// Fallback order:
/// 1. the repository's own manifest, if valid (no tool runs)
/// 2. inference from source imports
/// 3. a snapshot of the host environment, only if inference failed
///
/// Never fatal: the worst case is `Degraded(Unresolved)` and SBOM generation
/// proceeds with whatever is on disk.
///
/// A manifest that is a symbolic link is removed before any tool writes to it,
/// so regeneration only ever touches the file inside the checkout.
pub struct ManifestResolver<MR> {
    regenerator: MR,
}

impl<MR: ManifestRegenerator> ManifestResolver<MR> {
    pub fn new(regenerator: MR) -> Self {
        Self { regenerator }
    }

    pub async fn resolve<PR: ProgressReporter>(
        &self,
        checkout: &Path,
        reporter: &PR,
    ) -> StageOutcome<ManifestResolution> {
        let manifest = checkout.join(MANIFEST_FILE_NAME);

        let state = ManifestState::inspect(&manifest);
        if state.is_valid() {
            reporter.report(&format!("📄 Using declared {}", MANIFEST_FILE_NAME));
            return StageOutcome::Complete(ManifestResolution::Declared);
        }

        reporter.report(&format!(
            "📄 {} is {}, inferring dependencies from sources...",
            MANIFEST_FILE_NAME, state
        ));
        if let Err(reason) = Self::detach_symlink(&manifest, reporter) {
            return StageOutcome::Degraded {
                value: ManifestResolution::Unresolved,
                reason,
            };
        }
        let inference_error = match self.regenerator.infer_from_sources(checkout, &manifest).await {
            Ok(()) => {
                let state = ManifestState::inspect(&manifest);
                if state.is_valid() {
                    return StageOutcome::Complete(ManifestResolution::Inferred);
                }
                let reason = format!("inference succeeded but the manifest is {}", state);
                reporter.report_warning(&reason);
                return StageOutcome::Degraded {
                    value: ManifestResolution::Unresolved,
                    reason,
                };
            }
            Err(e) => e,
        };

        reporter.report_warning(&format!(
            "Dependency inference failed, falling back to the host environment: {:#}",
            inference_error
        ));
        if let Err(reason) = Self::detach_symlink(&manifest, reporter) {
            return StageOutcome::Degraded {
                value: ManifestResolution::Unresolved,
                reason,
            };
        }
        match self.regenerator.snapshot_environment(&manifest).await {
            Ok(()) if ManifestState::inspect(&manifest).is_valid() => StageOutcome::Degraded {
                value: ManifestResolution::EnvironmentSnapshot,
                reason: format!("dependency inference failed: {:#}", inference_error),
            },
            Ok(()) => {
                let reason = "host environment snapshot is empty".to_string();
                reporter.report_warning(&reason);
                StageOutcome::Degraded {
                    value: ManifestResolution::Unresolved,
                    reason,
                }
            }
            Err(e) => {
                let reason = format!("host environment snapshot failed: {:#}", e);
                reporter.report_warning(&reason);
                StageOutcome::Degraded {
                    value: ManifestResolution::Unresolved,
                    reason,
                }
            }
        }
    }

    /// Removes the manifest if it is a symbolic link
    ///
    /// # Errors
    /// Returns the warning to report when the link cannot be removed
    fn detach_symlink<PR: ProgressReporter>(manifest: &Path, reporter: &PR) -> Result<(), String> {
        if !ManifestState::inspect(manifest).is_symlink() {
            return Ok(());
        }
        match fs::remove_file(manifest) {
            Ok(()) => {
                reporter.report_warning(&format!(
                    "Removed symbolic link {} before regenerating it",
                    manifest.display()
                ));
                Ok(())
            }
            Err(e) => {
                let reason = format!(
                    "Security: refusing to regenerate {} through a symbolic link: {}",
                    manifest.display(),
                    e
                );
                reporter.report_warning(&reason);
                Err(reason)
            }
        }
    }
}
