use crate::ports::outbound::{BranchHead, CommitSource};
use crate::shared::error::PipelineError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const GITHUB_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct BranchResponse {
    name: String,
    commit: CommitRef,
    #[serde(rename = "_links")]
    links: BranchLinks,
}

#[derive(Debug, Deserialize)]
struct CommitRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct BranchLinks {
    html: String,
}

/// GitHubCommitSource adapter reading branch heads from the GitHub REST API
///
/// Any failure, whether a transport error, a non-success status or an
/// unexpected body, is reported as `PipelineError::CommitSourceFetch`
/// with the upstream response body kept verbatim.
pub struct GitHubCommitSource {
    client: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl GitHubCommitSource {
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_api_base(GITHUB_API_BASE, token)
    }

    /// Creates a client against a different API root (GitHub Enterprise, tests)
    pub fn with_api_base(api_base: impl Into<String>, token: Option<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!("conspector/{}", version))
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    fn branch_url(&self, owner: &str, repo: &str, branch: &str) -> String {
        format!(
            "{}/repos/{}/{}/branches/{}",
            self.api_base,
            urlencoding::encode(owner),
            urlencoding::encode(repo),
            urlencoding::encode(branch)
        )
    }

    fn parse_branch_response(body: &str) -> std::result::Result<BranchHead, PipelineError> {
        let response: BranchResponse =
            serde_json::from_str(body).map_err(|e| PipelineError::CommitSourceFetch {
                status: None,
                details: format!("Unexpected response body ({}): {}", e, body),
            })?;

        Ok(BranchHead {
            branch: response.name,
            commit_sha: response.commit.sha,
            repository_url: response.links.html,
        })
    }
}

#[async_trait]
impl CommitSource for GitHubCommitSource {
    async fn fetch_branch_head(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<BranchHead> {
        let mut request = self
            .client
            .get(self.branch_url(owner, repo, branch))
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PipelineError::CommitSourceFetch {
                status: None,
                details: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::CommitSourceFetch {
                status: Some(status.as_u16()),
                details: e.to_string(),
            })?;

        if !status.is_success() {
            return Err(PipelineError::CommitSourceFetch {
                status: Some(status.as_u16()),
                details: body,
            }
            .into());
        }

        Ok(Self::parse_branch_response(&body)?)
    }
}
