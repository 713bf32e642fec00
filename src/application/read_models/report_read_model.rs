//! Report read model consumed by report writers

use crate::scan_pipeline::domain::{ComponentRow, ReportRow};

/// Sheet name of the component inventory
pub const COMPONENTS_SHEET: &str = "SBOM";
/// Sheet name of the vulnerability rows
pub const VULNERABILITIES_SHEET: &str = "Vulnerabilities";

pub const COMPONENT_HEADERS: [&str; 5] = ["Name", "Version", "Type", "License", "Description"];

pub const VULNERABILITY_HEADERS: [&str; 9] = [
    "Vulnerability ID",
    "CVE ID",
    "Description",
    "Severity",
    "CVSS",
    "Affected Component",
    "Source",
    "Advisory",
    "Exploit Info",
];

/// Denormalized view of one run's report
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportReadModel {
    /// Component inventory, in findings-document order
    pub components: Vec<ComponentRow>,
    /// Fanned-out vulnerability rows, in finding/component/advisory order
    pub vulnerabilities: Vec<ReportRow>,
}

impl ReportReadModel {
    pub fn row_count(&self) -> usize {
        self.vulnerabilities.len()
    }
}
