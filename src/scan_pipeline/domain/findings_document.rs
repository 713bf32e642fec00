use super::NOT_AVAILABLE;
use crate::shared::Result;
use serde::{Deserialize, Serialize};

/// Findings document produced by the vulnerability scanner
///
/// Follows the CycloneDX JSON layout: an inventory of `components` plus the
/// `vulnerabilities` found in them. Only the fields the report needs are
/// modelled; everything else in the scanner output is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FindingsDocument {
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub vulnerabilities: Vec<RawFinding>,
}

impl FindingsDocument {
    pub fn from_json(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            anyhow::bail!("Findings document is empty");
        }
        Ok(serde_json::from_str(content)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Component {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, rename = "type")]
    pub component_type: Option<String>,
    #[serde(default)]
    pub licenses: Vec<LicenseChoice>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Component {
    /// First declared license, preferring the SPDX id, then the name, then an expression
    pub fn primary_license(&self) -> Option<&str> {
        let choice = self.licenses.first()?;
        choice
            .license
            .as_ref()
            .and_then(|l| l.id.as_deref().or(l.name.as_deref()))
            .or(choice.expression.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LicenseChoice {
    #[serde(default)]
    pub license: Option<LicenseRef>,
    #[serde(default)]
    pub expression: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LicenseRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One vulnerability record as emitted by the scanner, before fan-out into report rows
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawFinding {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(default)]
    pub source: Option<FindingSource>,
    #[serde(default)]
    pub advisories: Vec<Advisory>,
    #[serde(default)]
    pub affects: Vec<Affect>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Rating {
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FindingSource {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Advisory {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Affect {
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
}

impl RawFinding {
    pub fn id_or_na(&self) -> String {
        or_na(self.id.as_deref())
    }

    pub fn description_or_na(&self) -> String {
        or_na(self.description.as_deref())
    }

    /// Severity of the first rating
    pub fn severity(&self) -> String {
        or_na(self.ratings.first().and_then(|r| r.severity.as_deref()))
    }

    /// Score of the first rating
    pub fn score(&self) -> Option<f64> {
        self.ratings.first().and_then(|r| r.score)
    }

    /// Advisory source URL, "N/A" when missing or blank
    pub fn source_url(&self) -> String {
        or_na(self.source.as_ref().and_then(|s| s.url.as_deref()))
    }

    pub fn advisory_urls(&self) -> Vec<String> {
        self.advisories
            .iter()
            .map(|a| or_na(a.url.as_deref()))
            .collect()
    }

    pub fn affected_refs(&self) -> Vec<String> {
        self.affects
            .iter()
            .map(|a| or_na(a.reference.as_deref()))
            .collect()
    }
}

fn or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
