//! Builder for constructing ReportReadModel from the findings document
//!
//! Joins the scanner's findings with the enricher's output and applies
//! the fan-out rules.

use super::report_read_model::ReportReadModel;
use crate::scan_pipeline::domain::{ComponentRow, Enrichment, FindingsDocument};
use crate::scan_pipeline::policies::ZeroAdvisoryPolicy;
use crate::scan_pipeline::services::FindingFanOut;

pub struct ReportReadModelBuilder;

impl ReportReadModelBuilder {
    /// Builds the report model
    ///
    /// # Arguments
    /// * `document` - Parsed scanner output
    /// * `enrichments` - One entry per vulnerability, index-aligned with `document.vulnerabilities`
    /// * `policy` - What to do with findings that list no advisory
    pub fn build(
        document: &FindingsDocument,
        enrichments: &[Enrichment],
        policy: ZeroAdvisoryPolicy,
    ) -> ReportReadModel {
        ReportReadModel {
            components: document.components.iter().map(ComponentRow::from).collect(),
            vulnerabilities: FindingFanOut::expand_all(
                &document.vulnerabilities,
                enrichments,
                policy,
            ),
        }
    }
}
