use super::RepositoryLocator;
use crate::shared::security::validate_branch_name;
use crate::shared::Result;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Directory label format for a run timestamp, e.g. `2026-19-Oct-14-03-22-517`
///
/// Millisecond precision keeps two runs triggered within the same second apart.
pub const TIMESTAMP_FORMAT: &str = "%Y-%d-%b-%H-%M-%S-%3f";

/// File name of the JSON export consumed by ticketing systems
pub const TICKET_EXPORT_FILE_NAME: &str = "ticket_export.json";

/// RunIdentity - the (repository, branch, timestamp) triple keying one pipeline run
///
/// The timestamp is captured once when the run starts. Everything a run writes lives
/// under `root/<repo-name>/<branch>/<timestamp>/`, so concurrent runs for the same
/// branch never share a directory and repeated stage calls within one run reuse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunIdentity {
    locator: RepositoryLocator,
    branch: String,
    started_at: DateTime<Local>,
}

impl RunIdentity {
    pub fn new(
        locator: RepositoryLocator,
        branch: impl Into<String>,
        started_at: DateTime<Local>,
    ) -> Result<Self> {
        let branch = branch.into();
        validate_branch_name(&branch)?;
        Ok(Self {
            locator,
            branch,
            started_at,
        })
    }

    /// Creates a run identity stamped with the current local time
    pub fn start(locator: RepositoryLocator, branch: impl Into<String>) -> Result<Self> {
        Self::new(locator, branch, Local::now())
    }

    pub fn locator(&self) -> &RepositoryLocator {
        &self.locator
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn timestamp_label(&self) -> String {
        self.started_at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// `root/<repo-name>/<branch>/<timestamp>/`
    pub fn staging_path(&self, root: &Path) -> PathBuf {
        root.join(self.locator.name())
            .join(&self.branch)
            .join(self.timestamp_label())
    }

    /// `root/<repo-name>/<branch>/<timestamp>/<repo-name>/`
    pub fn checkout_path(&self, root: &Path) -> PathBuf {
        self.staging_path(root).join(self.locator.name())
    }

    pub fn sbom_file_name(&self) -> String {
        format!("sbom-{}.json", self.branch_file_stem())
    }

    pub fn findings_file_name(&self) -> String {
        format!("vulnerabilities-{}.json", self.branch_file_stem())
    }

    pub fn report_file_name(&self) -> String {
        format!("vulnerability-report-{}.xlsx", self.branch_file_stem())
    }

    /// Branch name flattened for use inside a single file name
    fn branch_file_stem(&self) -> String {
        self.branch.replace('/', "_")
    }
}
