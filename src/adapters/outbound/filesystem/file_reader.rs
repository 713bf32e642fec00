use crate::shared::error::PipelineError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for reading tool output from the staging directory
///
/// Files written by external tools are read back with the same checks
/// applied to every file the pipeline consumes: no symlinks, regular
/// files only, bounded size.
#[derive(Debug, Clone, Default)]
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Reads `path` as UTF-8 text
    ///
    /// # Arguments
    /// * `path` - File to read
    /// * `file_description` - Human-readable name used in error messages
    ///
    /// # Errors
    /// Returns `PipelineError::FileReadError` if any security check
    /// fails or the content cannot be read
    pub fn read_text(&self, path: &Path, file_description: &str) -> Result<String> {
        self.safe_read_file(path, file_description).map_err(|e| {
            PipelineError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    fn safe_read_file(&self, path: &Path, file_description: &str) -> Result<String> {
        validate_regular_file(path, file_description)?;

        let metadata = fs::symlink_metadata(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;
        validate_file_size(metadata.len(), path, MAX_FILE_SIZE)?;

        fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file_description, e))
    }
}
