use regex::Regex;
use std::sync::LazyLock;

static CVE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"CVE-\d{4}-\d{4,}").expect("CVE pattern is a valid regex"));

/// Authoritative vulnerability identifier, e.g. `CVE-2019-10906`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CveId(String);

impl CveId {
    /// Returns the first CVE identifier appearing in `text`
    pub fn find_in(text: &str) -> Option<Self> {
        CVE_PATTERN
            .find(text)
            .map(|m| CveId(m.as_str().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
