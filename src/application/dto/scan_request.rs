use crate::ports::outbound::BranchHead;
use crate::shared::error::PipelineError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Where a scan request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Repository URL and branch given explicitly
    Manual,
    /// Head of a branch polled from the commit source
    LatestCommit,
    /// A push-event notification
    PushEvent,
}

/// ScanRequest - input of one pipeline run
///
/// The run timestamp is fixed when the request is created, so every
/// artifact of the run lands in the same staging directory.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Browse or clone URL of the repository
    pub repository_url: String,
    pub branch: String,
    /// Commit that triggered the run, unknown for manual triggers
    pub commit_sha: Option<String>,
    pub trigger: TriggerKind,
    pub started_at: DateTime<Local>,
}

impl ScanRequest {
    pub fn manual(
        repository_url: impl Into<String>,
        branch: impl Into<String>,
        commit_sha: Option<String>,
    ) -> Self {
        Self {
            repository_url: repository_url.into(),
            branch: branch.into(),
            commit_sha,
            trigger: TriggerKind::Manual,
            started_at: Local::now(),
        }
    }

    /// Builds a request for the head of a branch reported by the commit source
    pub fn from_branch_head(head: &BranchHead) -> Self {
        Self {
            repository_url: head.repository_url.clone(),
            branch: head.branch.clone(),
            commit_sha: Some(head.commit_sha.clone()),
            trigger: TriggerKind::LatestCommit,
            started_at: Local::now(),
        }
    }

    /// Parses a push-event payload
    ///
    /// # Errors
    /// Returns `PipelineError::InvalidTrigger` when the payload is not JSON,
    /// is not a branch push (tags, deletions), or lacks the repository URL
    pub fn from_push_event(payload: &str) -> Result<Self, PipelineError> {
        let invalid = |reason: String| PipelineError::InvalidTrigger { reason };

        let event: PushEvent = serde_json::from_str(payload)
            .map_err(|e| invalid(format!("push event is not valid JSON: {}", e)))?;

        let branch = event
            .git_ref
            .strip_prefix(BRANCH_REF_PREFIX)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| invalid(format!("'{}' is not a branch reference", event.git_ref)))?
            .to_string();

        if event.deleted {
            return Err(invalid(format!("branch '{}' was deleted", branch)));
        }

        let repository_url = event
            .repository
            .html_url
            .or(event.repository.clone_url)
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| invalid("repository URL is missing".to_string()))?;

        let commit_sha = event.head_commit.map(|c| c.id).or(event.after);

        Ok(Self {
            repository_url,
            branch,
            commit_sha,
            trigger: TriggerKind::PushEvent,
            started_at: Local::now(),
        })
    }

    /// Overrides the run timestamp
    pub fn with_started_at(mut self, started_at: DateTime<Local>) -> Self {
        self.started_at = started_at;
        self
    }
}

#[derive(Debug, Deserialize)]
struct PushEvent {
    #[serde(rename = "ref")]
    git_ref: String,
    #[serde(default)]
    after: Option<String>,
    #[serde(default)]
    deleted: bool,
    #[serde(default)]
    head_commit: Option<HeadCommit>,
    repository: PushRepository,
}

#[derive(Debug, Deserialize)]
struct HeadCommit {
    id: String,
}

#[derive(Debug, Deserialize)]
struct PushRepository {
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    clone_url: Option<String>,
}
