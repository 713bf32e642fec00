use crate::application::read_models::report_read_model::{
    COMPONENTS_SHEET, COMPONENT_HEADERS, VULNERABILITIES_SHEET, VULNERABILITY_HEADERS,
};
use crate::application::read_models::ReportReadModel;
use crate::scan_pipeline::domain::{SeverityTier, NOT_AVAILABLE};
use crate::shared::Result;
use rust_xlsxwriter::{Color, Format, FormatAlign, Url, Workbook, Worksheet};

/// Width of the free-text columns (Description, Exploit Info)
const WIDE_COLUMN_WIDTH: f64 = 80.0;
/// Excel rejects column widths above 255 characters
const MAX_COLUMN_WIDTH: usize = 255;
/// Excel stores at most this many characters in one cell
const MAX_CELL_CHARS: usize = 32_767;

/// One cell of a sheet, before styling
enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    /// Hyperlink shown with `label` instead of the URL
    Link { url: &'a str, label: &'static str },
}

impl Cell<'_> {
    fn display_len(&self) -> usize {
        match self {
            Cell::Text(text) => text.chars().count(),
            Cell::Number(value) => value.to_string().len(),
            Cell::Link { label, .. } => label.len(),
        }
    }
}

/// WorkbookFormatter renders the report model as an xlsx workbook
///
/// Two sheets: the component inventory and the vulnerability rows. Every
/// cell is top-aligned and wrapped, the severity cell is filled by tier,
/// source and advisory URLs become labelled hyperlinks.
pub struct WorkbookFormatter;

impl WorkbookFormatter {
    /// Renders `model` and returns the xlsx file content
    pub fn format(model: &ReportReadModel) -> Result<Vec<u8>> {
        let base = Format::new().set_align(FormatAlign::Top).set_text_wrap();
        let mut workbook = Workbook::new();

        let component_rows: Vec<Vec<Cell>> = model
            .components
            .iter()
            .map(|c| {
                vec![
                    Cell::Text(&c.name),
                    Cell::Text(&c.version),
                    Cell::Text(&c.component_type),
                    Cell::Text(&c.license),
                    Cell::Text(&c.description),
                ]
            })
            .collect();
        let sheet = workbook.add_worksheet();
        sheet.set_name(COMPONENTS_SHEET)?;
        Self::write_sheet(sheet, &COMPONENT_HEADERS, &component_rows, &base, &[4])?;

        let vulnerability_rows: Vec<Vec<Cell>> = model
            .vulnerabilities
            .iter()
            .map(|r| {
                vec![
                    Cell::Text(&r.vulnerability_id),
                    Cell::Text(&r.cve_id),
                    Cell::Text(&r.description),
                    Cell::Text(&r.severity),
                    r.cvss.map(Cell::Number).unwrap_or(Cell::Text(NOT_AVAILABLE)),
                    Cell::Text(&r.affected_component),
                    Self::link_or_text(&r.source, "Source"),
                    Self::link_or_text(&r.advisory, "Advisory"),
                    Cell::Text(&r.exploit_info),
                ]
            })
            .collect();
        let sheet = workbook.add_worksheet();
        sheet.set_name(VULNERABILITIES_SHEET)?;
        Self::write_sheet(sheet, &VULNERABILITY_HEADERS, &vulnerability_rows, &base, &[2, 8])?;

        Ok(workbook.save_to_buffer()?)
    }

    fn link_or_text<'a>(url: &'a str, label: &'static str) -> Cell<'a> {
        if url == NOT_AVAILABLE {
            Cell::Text(url)
        } else {
            Cell::Link { url, label }
        }
    }

    /// Writes headers and rows, then sizes the columns
    ///
    /// Columns listed in `wide_columns` get the fixed free-text width; every
    /// other column is as wide as its longest cell plus 2.
    fn write_sheet(
        sheet: &mut Worksheet,
        headers: &[&str],
        rows: &[Vec<Cell>],
        base: &Format,
        wide_columns: &[u16],
    ) -> Result<()> {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

        for (col, header) in headers.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *header, base)?;
        }

        for (idx, row) in rows.iter().enumerate() {
            let row_num = idx as u32 + 1;
            for (col, cell) in row.iter().enumerate() {
                let col_num = col as u16;
                widths[col] = widths[col].max(cell.display_len());
                match cell {
                    Cell::Text(text) => {
                        let format = Self::severity_format(headers[col], text, base);
                        sheet.write_string_with_format(
                            row_num,
                            col_num,
                            Self::fit_cell(text),
                            &format,
                        )?;
                    }
                    Cell::Number(value) => {
                        sheet.write_number_with_format(row_num, col_num, *value, base)?;
                    }
                    Cell::Link { url, label } => {
                        if sheet
                            .write_url_with_format(
                                row_num,
                                col_num,
                                Url::new(*url).set_text(*label),
                                base,
                            )
                            .is_err()
                        {
                            // URLs Excel cannot store as links are kept as plain text
                            sheet.write_string_with_format(
                                row_num,
                                col_num,
                                Self::fit_cell(url),
                                base,
                            )?;
                        }
                    }
                }
            }
        }

        for (col, width) in widths.iter().enumerate() {
            let col_num = col as u16;
            if wide_columns.contains(&col_num) {
                sheet.set_column_width(col_num, WIDE_COLUMN_WIDTH)?;
            } else {
                let width = (width + 2).min(MAX_COLUMN_WIDTH);
                sheet.set_column_width(col_num, width as f64)?;
            }
        }

        Ok(())
    }

    /// Cuts `text` to the cell limit on a character boundary
    fn fit_cell(text: &str) -> &str {
        match text.char_indices().nth(MAX_CELL_CHARS) {
            Some((end, _)) => &text[..end],
            None => text,
        }
    }

    /// Base format, plus the tier fill for cells of the Severity column
    fn severity_format(header: &str, value: &str, base: &Format) -> Format {
        if header != "Severity" {
            return base.clone();
        }
        match SeverityTier::from_label(value) {
            Some(tier) => base
                .clone()
                .set_background_color(Color::RGB(tier.fill_rgb())),
            None => base.clone(),
        }
    }
}
