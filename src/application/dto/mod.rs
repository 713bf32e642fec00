/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod pipeline_outcome;
mod scan_request;

pub use pipeline_outcome::{
    FailureReason, PipelineFailure, PipelineOutcome, RunSummary, TriggerContext,
};
pub use scan_request::{ScanRequest, TriggerKind};
