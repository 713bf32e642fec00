use crate::shared::Result;

/// Path segments that mark the start of a web "browse" suffix on a repository URL
const BROWSE_MARKERS: [&str; 2] = ["/tree", "/blob"];

/// RepositoryLocator value object
///
/// Holds the canonical clone URL of a repository and the name derived from it.
/// Commit-source APIs usually hand back browse URLs such as
/// `https://github.com/org/app/tree/main`; the locator strips that suffix so the
/// URL can be handed to `git clone` and the name used as a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    clone_url: String,
    name: String,
}

impl RepositoryLocator {
    pub fn parse(url: &str) -> Result<Self> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            anyhow::bail!("Repository URL cannot be empty");
        }

        let clone_url = strip_browse_suffix(trimmed).trim_end_matches('/').to_string();

        let last_segment = clone_url
            .rsplit(['/', ':'])
            .next()
            .unwrap_or_default();
        let name = last_segment
            .strip_suffix(".git")
            .unwrap_or(last_segment)
            .to_string();

        if name.is_empty() || name == "." || name == ".." {
            anyhow::bail!(
                "Cannot derive a repository name from URL '{}'",
                url.trim()
            );
        }

        Ok(Self { clone_url, name })
    }

    pub fn clone_url(&self) -> &str {
        &self.clone_url
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for RepositoryLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.clone_url)
    }
}

fn strip_browse_suffix(url: &str) -> &str {
    for marker in BROWSE_MARKERS {
        let mut search_from = 0;
        while let Some(pos) = url[search_from..].find(marker) {
            let start = search_from + pos;
            let end = start + marker.len();
            // Only a whole path segment counts: "/tree" or "/tree/...", never "/treehouse"
            if end == url.len() || url[end..].starts_with('/') {
                return &url[..start];
            }
            search_from = end;
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_https_url() {
        let locator = RepositoryLocator::parse("https://example.com/org/app").unwrap();
        assert_eq!(locator.clone_url(), "https://example.com/org/app");
        assert_eq!(locator.name(), "app");
    }

    #[test]
    fn test_parse_strips_tree_suffix() {
        let locator =
            RepositoryLocator::parse("https://github.com/org/app/tree/feature/login").unwrap();
        assert_eq!(locator.clone_url(), "https://github.com/org/app");
        assert_eq!(locator.name(), "app");
    }

    #[test]
    fn test_parse_strips_bare_tree_and_blob_suffix() {
        let tree = RepositoryLocator::parse("https://github.com/org/app/tree").unwrap();
        assert_eq!(tree.clone_url(), "https://github.com/org/app");

        let blob =
            RepositoryLocator::parse("https://github.com/org/app/blob/main/README.md").unwrap();
        assert_eq!(blob.clone_url(), "https://github.com/org/app");
    }

    #[test]
    fn test_parse_keeps_segments_that_only_start_with_tree() {
        let locator = RepositoryLocator::parse("https://example.com/org/treehouse").unwrap();
        assert_eq!(locator.clone_url(), "https://example.com/org/treehouse");
        assert_eq!(locator.name(), "treehouse");
    }

    #[test]
    fn test_parse_strips_trailing_slash_and_git_suffix() {
        let locator = RepositoryLocator::parse("https://example.com/org/app.git/").unwrap();
        assert_eq!(locator.clone_url(), "https://example.com/org/app.git");
        assert_eq!(locator.name(), "app");
    }

    #[test]
    fn test_parse_scp_style_url() {
        let locator = RepositoryLocator::parse("git@github.com:org/app.git").unwrap();
        assert_eq!(locator.name(), "app");
    }

    #[test]
    fn test_parse_empty_url() {
        assert!(RepositoryLocator::parse("   ").is_err());
    }

    #[test]
    fn test_parse_rejects_dot_dot_name() {
        assert!(RepositoryLocator::parse("https://example.com/org/..").is_err());
    }

    #[test]
    fn test_display_is_clone_url() {
        let locator = RepositoryLocator::parse("https://example.com/org/app/tree/main").unwrap();
        assert_eq!(format!("{}", locator), "https://example.com/org/app");
    }
}
