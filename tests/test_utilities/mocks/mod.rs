/// Mock implementations for testing
mod mock_advisory_repository;
mod mock_exploit_lookup;
mod mock_manifest_regenerator;
mod mock_progress_reporter;
mod mock_repository_cloner;
mod mock_sbom_tool;
mod mock_vulnerability_scanner;

pub use mock_advisory_repository::MockAdvisoryRepository;
pub use mock_exploit_lookup::MockExploitLookup;
pub use mock_manifest_regenerator::MockManifestRegenerator;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_repository_cloner::MockRepositoryCloner;
pub use mock_sbom_tool::MockSbomTool;
pub use mock_vulnerability_scanner::MockVulnerabilityScanner;

use std::sync::{Arc, Mutex};

/// Ordered log of adapter calls, shared by every mock of one pipeline
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn record(log: &CallLog, call: &str) {
    log.lock().unwrap().push(call.to_string());
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}
