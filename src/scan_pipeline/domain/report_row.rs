use super::{Component, NOT_AVAILABLE};
use serde::{Serialize, Serializer};

/// One line of the vulnerabilities sheet and one entry of the ticket export
///
/// A raw finding fans out into one row per (affected component, advisory URL) pair;
/// every row repeats the finding's shared fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub vulnerability_id: String,
    pub cve_id: String,
    pub description: String,
    pub severity: String,
    #[serde(serialize_with = "score_or_na")]
    pub cvss: Option<f64>,
    pub affected_component: String,
    pub source: String,
    pub advisory: String,
    pub exploit_info: String,
}

impl ReportRow {
    /// CVSS score as displayed in the report
    pub fn cvss_label(&self) -> String {
        self.cvss
            .map(|score| score.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

fn score_or_na<S: Serializer>(score: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match score {
        Some(value) => serializer.serialize_f64(*value),
        None => serializer.serialize_str(NOT_AVAILABLE),
    }
}

/// One line of the components (SBOM) sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRow {
    pub name: String,
    pub version: String,
    pub component_type: String,
    pub license: String,
    pub description: String,
}

impl From<&Component> for ComponentRow {
    fn from(component: &Component) -> Self {
        let or_na = |value: Option<&str>| value.unwrap_or(NOT_AVAILABLE).to_string();
        Self {
            name: or_na(component.name.as_deref()),
            version: or_na(component.version.as_deref()),
            component_type: or_na(component.component_type.as_deref()),
            license: or_na(component.primary_license()),
            description: or_na(component.description.as_deref()),
        }
    }
}

/// Data attached to a finding by the enricher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub cve_id: String,
    pub exploit_info: String,
}

impl Enrichment {
    pub fn new(cve_id: impl Into<String>, exploit_info: impl Into<String>) -> Self {
        Self {
            cve_id: cve_id.into(),
            exploit_info: exploit_info.into(),
        }
    }

    pub fn not_available() -> Self {
        Self::new(NOT_AVAILABLE, NOT_AVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_pipeline::domain::{LicenseChoice, LicenseRef};

    fn row(cvss: Option<f64>) -> ReportRow {
        ReportRow {
            vulnerability_id: "GHSA-1".to_string(),
            cve_id: "CVE-2024-1234".to_string(),
            description: "desc".to_string(),
            severity: "high".to_string(),
            cvss,
            affected_component: "pkg:pypi/a@1".to_string(),
            source: "https://example.com/s".to_string(),
            advisory: "https://example.com/a".to_string(),
            exploit_info: "N/A".to_string(),
        }
    }

    #[test]
    fn test_row_serializes_score_as_number() {
        let json = serde_json::to_value(row(Some(7.5))).unwrap();
        assert_eq!(json["cvss"], serde_json::json!(7.5));
        assert_eq!(json["cve_id"], "CVE-2024-1234");
        assert_eq!(json["affected_component"], "pkg:pypi/a@1");
    }

    #[test]
    fn test_row_serializes_missing_score_as_na() {
        let json = serde_json::to_value(row(None)).unwrap();
        assert_eq!(json["cvss"], "N/A");
        assert_eq!(row(None).cvss_label(), "N/A");
        assert_eq!(row(Some(9.8)).cvss_label(), "9.8");
    }

    #[test]
    fn test_component_row_defaults() {
        let component_row = ComponentRow::from(&Component::default());
        assert_eq!(component_row.name, "N/A");
        assert_eq!(component_row.version, "N/A");
        assert_eq!(component_row.component_type, "N/A");
        assert_eq!(component_row.license, "N/A");
        assert_eq!(component_row.description, "N/A");
    }

    #[test]
    fn test_component_row_from_component() {
        let component = Component {
            name: Some("requests".to_string()),
            version: Some("2.31.0".to_string()),
            component_type: Some("library".to_string()),
            licenses: vec![LicenseChoice {
                license: Some(LicenseRef {
                    id: Some("Apache-2.0".to_string()),
                    name: None,
                }),
                expression: None,
            }],
            description: None,
        };
        let component_row = ComponentRow::from(&component);
        assert_eq!(component_row.name, "requests");
        assert_eq!(component_row.license, "Apache-2.0");
        assert_eq!(component_row.description, "N/A");
    }
}
