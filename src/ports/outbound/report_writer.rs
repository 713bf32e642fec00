use crate::application::read_models::ReportReadModel;
use crate::scan_pipeline::domain::ReportRow;
use crate::shared::Result;
use std::path::Path;

/// ReportWriter port for persisting the assembled report
///
/// Implementations must not leave a partially written file at `path`
/// when they return an error.
pub trait ReportWriter {
    /// Writes the two-sheet workbook (components, vulnerabilities) to `path`
    fn write_workbook(&self, model: &ReportReadModel, path: &Path) -> Result<()>;

    /// Writes the vulnerability rows as an indented JSON array to `path`
    fn write_ticket_export(&self, rows: &[ReportRow], path: &Path) -> Result<()>;
}
