/// Traffic-light tier used to color the Severity column
///
/// Matching is exact and case-sensitive: only the scanner's lowercase
/// `high`, `medium` and `low` labels get a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityTier {
    High,
    Medium,
    Low,
}

impl SeverityTier {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "high" => Some(SeverityTier::High),
            "medium" => Some(SeverityTier::Medium),
            "low" => Some(SeverityTier::Low),
            _ => None,
        }
    }

    /// Solid fill color as 0xRRGGBB
    pub fn fill_rgb(&self) -> u32 {
        match self {
            SeverityTier::High => 0xFF0000,
            SeverityTier::Medium => 0xFFFF00,
            SeverityTier::Low => 0x00FF00,
        }
    }
}
