/// What to do with a finding that lists no advisory URLs
///
/// Fan-out produces one row per (affected component, advisory) pair, so a finding
/// without advisories would otherwise vanish from the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroAdvisoryPolicy {
    /// Keep the finding with advisory "N/A" (one row per affected component)
    #[default]
    Preserve,
    /// Leave the finding out of the report
    Drop,
}

impl ZeroAdvisoryPolicy {
    pub fn from_keep_flag(keep: bool) -> Self {
        if keep {
            ZeroAdvisoryPolicy::Preserve
        } else {
            ZeroAdvisoryPolicy::Drop
        }
    }
}
