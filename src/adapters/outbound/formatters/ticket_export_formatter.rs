use crate::scan_pipeline::domain::ReportRow;
use crate::shared::Result;

/// TicketExportFormatter renders vulnerability rows for ticketing systems
///
/// The export is an indented JSON array holding one object per report row,
/// in report order. Missing values stay "N/A", matching the spreadsheet.
pub struct TicketExportFormatter;

impl TicketExportFormatter {
    pub fn format(rows: &[ReportRow]) -> Result<String> {
        let mut json = serde_json::to_string_pretty(rows)
            .map_err(|e| anyhow::anyhow!("Failed to serialize ticket export: {}", e))?;
        json.push('\n');
        Ok(json)
    }
}
