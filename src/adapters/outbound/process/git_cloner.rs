use super::CommandRunner;
use crate::ports::outbound::RepositoryCloner;
use crate::shared::error::ToolError;
use crate::shared::Result;
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::Path;

/// GitCloner adapter performing shallow single-branch clones with the git CLI
pub struct GitCloner {
    git_path: String,
    runner: CommandRunner,
}

impl GitCloner {
    pub fn new(git_path: impl Into<String>, runner: CommandRunner) -> Self {
        Self {
            git_path: git_path.into(),
            runner,
        }
    }
}

#[async_trait]
impl RepositoryCloner for GitCloner {
    async fn shallow_clone(&self, clone_url: &str, branch: &str, target: &Path) -> Result<()> {
        // `--` keeps a URL starting with '-' from being read as an option
        let args = [
            OsStr::new("clone"),
            OsStr::new("--branch"),
            OsStr::new(branch),
            OsStr::new("--depth"),
            OsStr::new("1"),
            OsStr::new("--single-branch"),
            OsStr::new("--"),
            OsStr::new(clone_url),
            target.as_os_str(),
        ];
        self.runner.run(&self.git_path, args).await?;

        if !target.is_dir() {
            return Err(ToolError::MissingOutput {
                tool: self.git_path.clone(),
                path: target.to_path_buf(),
            }
            .into());
        }
        Ok(())
    }
}
