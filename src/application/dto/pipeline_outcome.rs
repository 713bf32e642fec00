use super::ScanRequest;
use crate::scan_pipeline::domain::{ManifestResolution, PipelineStage};
use crate::shared::error::ExitCode;
use serde_json::{json, Map, Value};
use std::path::PathBuf;

/// What triggered a run, echoed back in every outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerContext {
    pub commit: Option<String>,
    pub branch: String,
    pub repository_url: String,
}

impl From<&ScanRequest> for TriggerContext {
    fn from(request: &ScanRequest) -> Self {
        Self {
            commit: request.commit_sha.clone(),
            branch: request.branch.clone(),
            repository_url: request.repository_url.clone(),
        }
    }
}

/// Artifacts of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub context: TriggerContext,
    pub staging_path: PathBuf,
    pub sbom_path: PathBuf,
    pub findings_path: PathBuf,
    pub report_path: PathBuf,
    pub ticket_export_path: PathBuf,
    /// Number of vulnerability rows in the report
    pub rows: usize,
    pub manifest_resolution: ManifestResolution,
    /// Absorbed failures (manifest fallbacks, enrichment lookups)
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The trigger could not be turned into a run (bad URL, bad branch, bad payload)
    InvalidTrigger,
    /// The commit source could not tell us what to scan
    CommitSourceFetch,
    /// A fatal pipeline stage failed
    StageFailed,
}

/// Why and where a run stopped
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineFailure {
    pub context: TriggerContext,
    pub reason: FailureReason,
    /// Stage that was running; `Idle` when the run never started
    pub stage: PipelineStage,
    pub message: String,
    /// Artifacts produced before the failure
    pub sbom_path: Option<PathBuf>,
    pub findings_path: Option<PathBuf>,
}

/// PipelineOutcome - the single structured result of a trigger
///
/// Built once at the end of a run and never modified. `to_payload` renders
/// the JSON document printed for the caller; `http_status` and `exit_code`
/// classify it for webhook gateways and shells respectively.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    Success(RunSummary),
    Failure(PipelineFailure),
}

impl PipelineOutcome {
    /// Outcome for a trigger rejected before any stage ran
    pub fn rejected(context: TriggerContext, reason: FailureReason, message: impl Into<String>) -> Self {
        PipelineOutcome::Failure(PipelineFailure {
            context,
            reason,
            stage: PipelineStage::Idle,
            message: message.into(),
            sbom_path: None,
            findings_path: None,
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Success(_))
    }

    pub fn http_status(&self) -> u16 {
        match self {
            PipelineOutcome::Success(_) => 200,
            PipelineOutcome::Failure(failure) => match failure.reason {
                FailureReason::InvalidTrigger => 400,
                FailureReason::CommitSourceFetch => 502,
                FailureReason::StageFailed => 500,
            },
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            PipelineOutcome::Success(_) => ExitCode::Success,
            PipelineOutcome::Failure(failure) => match failure.reason {
                FailureReason::StageFailed => ExitCode::PipelineFailed,
                FailureReason::InvalidTrigger | FailureReason::CommitSourceFetch => {
                    ExitCode::ApplicationError
                }
            },
        }
    }

    /// JSON document describing the outcome
    pub fn to_payload(&self) -> Value {
        match self {
            PipelineOutcome::Success(summary) => json!({
                "msg": "SBOM and vulnerability report generated",
                "status": self.http_status(),
                "commit": summary.context.commit,
                "branch": summary.context.branch,
                "repo_url": summary.context.repository_url,
                "sbom_path": summary.sbom_path,
                "findings_path": summary.findings_path,
                "vulnerabilities_report": summary.report_path,
                "ticket_export": summary.ticket_export_path,
                "rows": summary.rows,
                "manifest_resolution": summary.manifest_resolution,
                "warnings": summary.warnings,
            }),
            PipelineOutcome::Failure(failure) => {
                let mut payload = Map::new();
                payload.insert("error".to_string(), json!(Self::error_title(failure)));
                payload.insert("msg".to_string(), json!(failure.message));
                payload.insert("status".to_string(), json!(self.http_status()));
                payload.insert("stage".to_string(), json!(failure.stage));
                payload.insert("commit".to_string(), json!(failure.context.commit));
                payload.insert("branch".to_string(), json!(failure.context.branch));
                payload.insert("repo_url".to_string(), json!(failure.context.repository_url));
                if let Some(path) = &failure.sbom_path {
                    payload.insert("sbom_path".to_string(), json!(path));
                }
                if let Some(path) = &failure.findings_path {
                    payload.insert("findings_path".to_string(), json!(path));
                }
                Value::Object(payload)
            }
        }
    }

    fn error_title(failure: &PipelineFailure) -> String {
        match failure.reason {
            FailureReason::InvalidTrigger => "Invalid trigger".to_string(),
            FailureReason::CommitSourceFetch => "Failed to fetch latest commit".to_string(),
            FailureReason::StageFailed => format!("Pipeline failed while {}", failure.stage),
        }
    }
}
