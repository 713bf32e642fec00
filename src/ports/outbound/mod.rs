/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (version control, external tools,
/// advisory pages, file system, console, etc.).
pub mod advisory_repository;
pub mod commit_source;
pub mod exploit_lookup;
pub mod manifest_regenerator;
pub mod progress_reporter;
pub mod report_writer;
pub mod repository_cloner;
pub mod sbom_tool;
pub mod vulnerability_scanner;

pub use advisory_repository::AdvisoryRepository;
pub use commit_source::{BranchHead, CommitSource};
pub use exploit_lookup::ExploitLookup;
pub use manifest_regenerator::ManifestRegenerator;
pub use progress_reporter::ProgressReporter;
pub use report_writer::ReportWriter;
pub use repository_cloner::RepositoryCloner;
pub use sbom_tool::SbomTool;
pub use vulnerability_scanner::VulnerabilityScanner;
