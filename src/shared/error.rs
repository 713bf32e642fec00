use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems and hook runners to distinguish between
/// a pipeline that ran and failed and a process that could not start a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The pipeline completed and a report was written
    Success = 0,
    /// The pipeline ran but one of its fatal stages failed
    PipelineFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (configuration, commit-source fetch, invalid trigger, ...)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::PipelineFailed => write!(f, "Pipeline Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors raised outside of the individual pipeline stages.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Missing required configuration: {key}\n\n💡 Hint: {hint}")]
    MissingConfiguration { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {value}\nReason: {reason}")]
    InvalidConfiguration {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Invalid staging root: {path}\nReason: {reason}\n\n💡 Hint: REPORT_OUTPUT_DIR must be an existing, absolute, writable directory")]
    InvalidStagingRoot { path: PathBuf, reason: String },

    #[error("Invalid trigger: {reason}")]
    InvalidTrigger { reason: String },

    #[error("Failed to fetch branch head from commit source{}\nDetails: {details}", status.map(|s| format!(" (status {})", s)).unwrap_or_default())]
    CommitSourceFetch { status: Option<u16>, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },
}

/// Errors raised while invoking an external executable.
///
/// A timeout is reported separately from a non-zero exit but stages treat
/// both the same way.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to start {tool}: {details}\n\n💡 Hint: Check that the executable is installed and the configured path is correct")]
    Spawn { tool: String, details: String },

    #[error("{tool} did not finish within {seconds} second(s) and was terminated")]
    TimedOut { tool: String, seconds: u64 },

    #[error("{tool} exited with {}{}", code.map(|c| format!("status {}", c)).unwrap_or_else(|| "a signal".to_string()), if stderr.is_empty() { String::new() } else { format!("\nstderr: {}", stderr) })]
    NonZeroExit {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{tool} reported success but did not produce {path}")]
    MissingOutput { tool: String, path: PathBuf },
}
