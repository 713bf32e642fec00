//! conspector - commit-to-report vulnerability pipeline
//!
//! For one repository branch, conspector clones the code, makes sure a
//! Python dependency manifest exists, generates an SBOM with syft, scans it
//! with grype, enriches every finding with its advisory title, CVE id and
//! known exploits, and exports a two-sheet spreadsheet plus a
//! ticket-import JSON file. Every artifact of a run lands in one
//! timestamped staging directory.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`scan_pipeline`): Run identity, manifest states, findings, stage machine
//! - **Application Layer** (`application`): Use cases, DTOs and the report read model
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): External tools, HTTP clients, files and console
//! - **Configuration** (`config`): YAML file, `.env` and environment layering
//! - **Shared** (`shared`): Common utilities, security checks and error types
//!
//! # Example
//!
//! ```no_run
//! use conspector::prelude::*;
//! use std::path::PathBuf;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<()> {
//! let runner = CommandRunner::new(Duration::from_secs(600));
//! let adapters = PipelineAdapters {
//!     cloner: GitCloner::new("git", runner.clone()),
//!     manifest_regenerator: PipreqsManifestRegenerator::new("pipreqs", "pip", runner.clone()),
//!     sbom_tool: SyftSbomTool::new("syft", runner.clone()),
//!     scanner: GrypeScanner::new("grype", runner),
//!     advisories: CachingAdvisoryRepository::new(AdvisoryPageClient::new()?),
//!     exploits: SearchsploitLookup::disabled(),
//!     report_writer: ReportFileWriter::new(),
//! };
//! let options = PipelineOptions {
//!     staging_root: PathBuf::from("/srv/reports"),
//!     enrichment_concurrency: DEFAULT_ENRICHMENT_CONCURRENCY,
//!     zero_advisory_policy: ZeroAdvisoryPolicy::Preserve,
//! };
//!
//! let use_case = ProcessCommitUseCase::new(adapters, StderrProgressReporter::new(), options);
//! let request = ScanRequest::manual("https://github.com/acme/shop", "main", None);
//!
//! let outcome = use_case.execute(request).await;
//! println!("{}", outcome.to_payload());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod scan_pipeline;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, ReportFileWriter,
    };
    pub use crate::adapters::outbound::formatters::{TicketExportFormatter, WorkbookFormatter};
    pub use crate::adapters::outbound::network::{
        AdvisoryPageClient, CachingAdvisoryRepository, GitHubCommitSource,
    };
    pub use crate::adapters::outbound::process::{
        CommandRunner, GitCloner, GrypeScanner, PipreqsManifestRegenerator, SearchsploitLookup,
        SyftSbomTool,
    };
    pub use crate::application::dto::{
        FailureReason, PipelineFailure, PipelineOutcome, RunSummary, ScanRequest, TriggerContext,
        TriggerKind,
    };
    pub use crate::application::read_models::{ReportReadModel, ReportReadModelBuilder};
    pub use crate::application::use_cases::{
        PipelineAdapters, PipelineOptions, ProcessCommitUseCase, DEFAULT_ENRICHMENT_CONCURRENCY,
    };
    pub use crate::ports::outbound::{
        AdvisoryRepository, BranchHead, CommitSource, ExploitLookup, ManifestRegenerator,
        ProgressReporter, ReportWriter, RepositoryCloner, SbomTool, VulnerabilityScanner,
    };
    pub use crate::scan_pipeline::domain::{
        ComponentRow, CveId, Enrichment, FindingsDocument, ManifestResolution, ManifestState,
        PipelineStage, ReportRow, RunIdentity, SeverityTier, NOT_AVAILABLE,
    };
    pub use crate::scan_pipeline::policies::ZeroAdvisoryPolicy;
    pub use crate::scan_pipeline::services::FindingFanOut;
    pub use crate::shared::error::{ExitCode, PipelineError, ToolError};
    pub use crate::shared::Result;
}
