use crate::shared::error::PipelineError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum file size for security (100 MB)
/// This prevents DoS attacks via excessively large files
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// # Security
/// This function uses `symlink_metadata()` instead of `metadata()` to ensure
/// we check the symlink itself, not the target it points to.
///
/// # Arguments
/// * `path` - The path to validate
/// * `operation` - Description of the operation (e.g., "read", "clone") for error messages
///
/// # Errors
/// Returns an error if the path is a symbolic link or if metadata cannot be read
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Security
/// This combines existence check, symlink check, and file type check in one operation.
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file (e.g., "findings document", "requirements.txt")
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read {} metadata: {}",
            file_description,
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(())
}

/// Validates file size is within acceptable limits
///
/// # Security
/// This prevents DoS attacks via excessively large files that could consume
/// system resources or cause out-of-memory errors.
///
/// # Arguments
/// * `file_size` - The size of the file in bytes
/// * `path` - The path to the file (for error messages)
/// * `max_size` - Maximum allowed size in bytes
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Validates the staging root that every run directory is created under
///
/// The root must be absolute, exist, be a real directory (not a symlink) and
/// not be read-only. Nothing is created or modified here, so a misconfigured
/// root is rejected before the first filesystem mutation of a run.
pub fn validate_staging_root(path: &Path) -> std::result::Result<(), PipelineError> {
    let invalid = |reason: String| PipelineError::InvalidStagingRoot {
        path: path.to_path_buf(),
        reason,
    };

    if !path.is_absolute() {
        return Err(invalid("Path is not absolute".to_string()));
    }

    let metadata = fs::symlink_metadata(path)
        .map_err(|e| invalid(format!("Directory does not exist or is unreadable: {}", e)))?;

    if metadata.is_symlink() {
        return Err(invalid(
            "Security: Staging root is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        ));
    }

    if !metadata.is_dir() {
        return Err(invalid("Not a directory".to_string()));
    }

    if metadata.permissions().readonly() {
        return Err(invalid("Directory is read-only".to_string()));
    }

    Ok(())
}

/// Validates a branch name before it is used as a path segment and a git argument
///
/// # Security
/// Rejects names that could be parsed as command-line options (leading `-`)
/// or escape the staging directory (`..`, absolute or backslash paths).
pub fn validate_branch_name(branch: &str) -> Result<()> {
    if branch.trim().is_empty() {
        anyhow::bail!("Branch name cannot be empty");
    }

    if branch.starts_with('-') {
        anyhow::bail!("Security: Branch name '{}' must not start with '-'", branch);
    }

    if branch.starts_with('/') || branch.ends_with('/') || branch.contains('\\') {
        anyhow::bail!(
            "Branch name '{}' must not start or end with '/' or contain backslashes",
            branch
        );
    }

    if branch.split('/').any(|segment| segment.is_empty() || segment == "." || segment == "..") {
        anyhow::bail!(
            "Security: Branch name '{}' contains an empty, '.' or '..' path segment",
            branch
        );
    }

    if branch.chars().any(|c| c.is_whitespace() || c.is_control()) {
        anyhow::bail!(
            "Branch name '{}' contains whitespace or control characters",
            branch
        );
    }

    Ok(())
}

/// Validates that a URL uses the http or https scheme
///
/// Advisory pages and the commit-source API are only ever fetched over HTTP(S);
/// anything else (file://, data:, bare paths) is refused before a request is built.
pub fn validate_http_url(url: &str) -> Result<()> {
    let lower = url.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        anyhow::bail!("Security: Only http(s) URLs can be fetched, got '{}'", url);
    }

    if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        anyhow::bail!("URL '{}' contains whitespace or control characters", url);
    }

    Ok(())
}
