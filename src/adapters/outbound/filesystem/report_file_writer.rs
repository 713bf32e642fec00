use super::FileSystemWriter;
use crate::adapters::outbound::formatters::{TicketExportFormatter, WorkbookFormatter};
use crate::application::read_models::ReportReadModel;
use crate::ports::outbound::ReportWriter;
use crate::scan_pipeline::domain::ReportRow;
use crate::shared::Result;
use std::path::Path;

/// ReportFileWriter adapter persisting the report artifacts on disk
///
/// Content is rendered fully in memory first and then written with
/// `FileSystemWriter::write_atomic`, so a failure never leaves a partial
/// workbook or export behind.
#[derive(Debug, Clone, Default)]
pub struct ReportFileWriter {
    writer: FileSystemWriter,
}

impl ReportFileWriter {
    pub fn new() -> Self {
        Self {
            writer: FileSystemWriter::new(),
        }
    }
}

impl ReportWriter for ReportFileWriter {
    fn write_workbook(&self, model: &ReportReadModel, path: &Path) -> Result<()> {
        let content = WorkbookFormatter::format(model)?;
        self.writer.write_atomic(path, &content)
    }

    fn write_ticket_export(&self, rows: &[ReportRow], path: &Path) -> Result<()> {
        let content = TicketExportFormatter::format(rows)?;
        self.writer.write_atomic(path, content.as_bytes())
    }
}
