/// Filesystem adapters for file I/O operations
mod file_reader;
mod file_writer;
mod report_file_writer;

pub use file_reader::FileSystemReader;
pub use file_writer::FileSystemWriter;
pub use report_file_writer::ReportFileWriter;
