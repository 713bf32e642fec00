/// Formatter adapters rendering the report model into file contents
mod ticket_export_formatter;
mod workbook_formatter;

pub use ticket_export_formatter::TicketExportFormatter;
pub use workbook_formatter::WorkbookFormatter;
