use crate::shared::error::ToolError;
use std::ffi::OsStr;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Default upper bound for a single external tool invocation
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(600);

/// Captured output of a successful tool invocation
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: String,
}

/// Runs external executables with a timeout
///
/// The child is killed when the timeout elapses; callers see a
/// `ToolError::TimedOut`, which stages handle like a non-zero exit.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    timeout: Duration,
}

impl CommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs `program` with `args` and waits for it to exit
    ///
    /// stdin is closed; stdout and stderr are captured.
    ///
    /// # Errors
    /// - `ToolError::Spawn` if the executable cannot be started
    /// - `ToolError::TimedOut` if it runs longer than the configured timeout
    /// - `ToolError::NonZeroExit` if it exits unsuccessfully
    pub async fn run<I, S>(&self, program: &str, args: I) -> Result<CommandOutput, ToolError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ToolError::Spawn {
                tool: program.to_string(),
                details: e.to_string(),
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| ToolError::Spawn {
                tool: program.to_string(),
                details: e.to_string(),
            })?,
            Err(_) => {
                return Err(ToolError::TimedOut {
                    tool: program.to_string(),
                    seconds: self.timeout.as_secs(),
                })
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(ToolError::NonZeroExit {
                tool: program.to_string(),
                code: output.status.code(),
                stderr,
            });
        }

        Ok(CommandOutput {
            stdout: output.stdout,
            stderr,
        })
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL_TIMEOUT)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let runner = CommandRunner::default();
        let output = runner.run("sh", ["-c", "echo hello"]).await.unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout), "hello\n");
    }

    #[tokio::test]
    async fn test_run_non_zero_exit_keeps_stderr() {
        let runner = CommandRunner::default();
        let err = runner
            .run("sh", ["-c", "echo boom >&2; exit 3"])
            .await
            .unwrap_err();

        match err {
            ToolError::NonZeroExit { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_missing_executable() {
        let runner = CommandRunner::default();
        let err = runner
            .run("conspector-no-such-tool", Vec::<&str>::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_run_times_out() {
        let runner = CommandRunner::new(Duration::from_millis(200));
        let err = runner.run("sleep", ["5"]).await.unwrap_err();
        assert!(matches!(err, ToolError::TimedOut { .. }));
    }
}
