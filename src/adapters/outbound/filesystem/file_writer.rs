use crate::shared::error::PipelineError;
use crate::shared::Result;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// FileSystemWriter adapter for writing report artifacts
///
/// Content goes to a temporary file in the destination directory which
/// is then renamed over the destination, so readers either see the previous
/// file (or nothing) or the complete new one.
#[derive(Debug, Clone, Default)]
pub struct FileSystemWriter;

impl FileSystemWriter {
    pub fn new() -> Self {
        Self
    }

    /// Atomically writes `content` to `path`
    ///
    /// # Errors
    /// Returns `PipelineError::FileWriteError` if the parent directory is
    /// missing, `path` is a symbolic link, or writing/renaming fails. The
    /// temporary file is removed on every error path.
    pub fn write_atomic(&self, path: &Path, content: &[u8]) -> Result<()> {
        let parent = Self::validate_parent_directory(path)?;
        Self::validate_output_security(path)?;

        let write_error = |details: String| PipelineError::FileWriteError {
            path: path.to_path_buf(),
            details,
        };

        let mut temp_file = NamedTempFile::new_in(parent)
            .map_err(|e| write_error(format!("Failed to create temporary file: {}", e)))?;
        temp_file
            .write_all(content)
            .and_then(|_| temp_file.as_file().sync_all())
            .map_err(|e| write_error(e.to_string()))?;
        temp_file
            .persist(path)
            .map_err(|e| write_error(format!("Failed to move file into place: {}", e.error)))?;

        Ok(())
    }

    /// Validates that the parent directory exists before writing
    fn validate_parent_directory(path: &Path) -> Result<&Path> {
        let parent = match path.parent() {
            Some(parent) if parent != Path::new("") => parent,
            _ => Path::new("."),
        };
        if !parent.is_dir() {
            return Err(PipelineError::FileWriteError {
                path: path.to_path_buf(),
                details: format!("Parent directory does not exist: {}", parent.display()),
            }
            .into());
        }
        Ok(parent)
    }

    /// Rejects an existing destination that is a symbolic link
    fn validate_output_security(path: &Path) -> Result<()> {
        if let Ok(metadata) = fs::symlink_metadata(path) {
            if metadata.is_symlink() {
                return Err(PipelineError::FileWriteError {
                    path: path.to_path_buf(),
                    details: "Security: Output path is a symbolic link. For security reasons, writing to symbolic links is not allowed.".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}
