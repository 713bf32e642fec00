use crate::shared::Result;
use async_trait::async_trait;

/// Head of a branch as reported by the commit source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchHead {
    pub branch: String,
    pub commit_sha: String,
    /// Browse URL of the branch; may carry a `/tree/<branch>` suffix
    pub repository_url: String,
}

/// CommitSource port for polling the latest commit of a branch
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// Fetches the head commit of `owner/repo@branch`
    ///
    /// # Errors
    /// Returns `PipelineError::CommitSourceFetch` carrying the upstream
    /// response when the source is unreachable or answers unexpectedly
    async fn fetch_branch_head(&self, owner: &str, repo: &str, branch: &str)
        -> Result<BranchHead>;
}
