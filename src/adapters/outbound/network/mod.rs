/// Network adapters for external HTTP calls
mod advisory_page_client;
mod caching_advisory_client;
mod github_client;

pub use advisory_page_client::AdvisoryPageClient;
pub use caching_advisory_client::CachingAdvisoryRepository;
pub use github_client::GitHubCommitSource;
