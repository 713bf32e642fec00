pub mod cve_id;
pub mod findings_document;
pub mod manifest;
pub mod pipeline_stage;
pub mod report_row;
pub mod repository_locator;
pub mod run_identity;
pub mod severity;

pub use cve_id::CveId;
pub use findings_document::{
    Advisory, Affect, Component, FindingSource, FindingsDocument, LicenseChoice, LicenseRef,
    Rating, RawFinding,
};
pub use manifest::{ManifestResolution, ManifestState, MANIFEST_FILE_NAME};
pub use pipeline_stage::{PipelineStage, StageOutcome, StageTracker};
pub use report_row::{ComponentRow, Enrichment, ReportRow};
pub use repository_locator::RepositoryLocator;
pub use run_identity::{RunIdentity, TICKET_EXPORT_FILE_NAME};
pub use severity::SeverityTier;

/// Sentinel used wherever a value is missing upstream or could not be resolved
pub const NOT_AVAILABLE: &str = "N/A";
