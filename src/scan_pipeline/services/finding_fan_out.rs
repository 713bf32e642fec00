use crate::scan_pipeline::domain::{Enrichment, RawFinding, ReportRow, NOT_AVAILABLE};
use crate::scan_pipeline::policies::ZeroAdvisoryPolicy;

/// FindingFanOut - expands raw findings into report rows
///
/// A finding with M affected components and N advisory URLs yields M×N rows,
/// component-major then advisory order. Shared fields (id, description,
/// severity, score, source and the enrichment) are copied into every row.
pub struct FindingFanOut;

impl FindingFanOut {
    pub fn expand(
        finding: &RawFinding,
        enrichment: &Enrichment,
        policy: ZeroAdvisoryPolicy,
    ) -> Vec<ReportRow> {
        let mut advisory_urls = finding.advisory_urls();
        if advisory_urls.is_empty() {
            match policy {
                ZeroAdvisoryPolicy::Drop => return Vec::new(),
                ZeroAdvisoryPolicy::Preserve => advisory_urls.push(NOT_AVAILABLE.to_string()),
            }
        }

        let vulnerability_id = finding.id_or_na();
        let description = finding.description_or_na();
        let severity = finding.severity();
        let cvss = finding.score();
        let source = finding.source_url();

        let mut rows = Vec::with_capacity(finding.affects.len() * advisory_urls.len());
        for affected_component in finding.affected_refs() {
            for advisory in &advisory_urls {
                rows.push(ReportRow {
                    vulnerability_id: vulnerability_id.clone(),
                    cve_id: enrichment.cve_id.clone(),
                    description: description.clone(),
                    severity: severity.clone(),
                    cvss,
                    affected_component: affected_component.clone(),
                    source: source.clone(),
                    advisory: advisory.clone(),
                    exploit_info: enrichment.exploit_info.clone(),
                });
            }
        }
        rows
    }

    /// Expands every finding with its enrichment, preserving finding order
    ///
    /// `enrichments` is index-aligned with `findings`; a missing entry is
    /// treated as not enriched.
    pub fn expand_all(
        findings: &[RawFinding],
        enrichments: &[Enrichment],
        policy: ZeroAdvisoryPolicy,
    ) -> Vec<ReportRow> {
        let fallback = Enrichment::not_available();
        findings
            .iter()
            .enumerate()
            .flat_map(|(idx, finding)| {
                let enrichment = enrichments.get(idx).unwrap_or(&fallback);
                Self::expand(finding, enrichment, policy)
            })
            .collect()
    }
}
