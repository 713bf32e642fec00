use crate::ports::outbound::{AdvisoryRepository, ExploitLookup, ProgressReporter};
use crate::scan_pipeline::domain::{CveId, Enrichment, RawFinding, NOT_AVAILABLE};
use crate::shared::security::validate_http_url;
use futures::stream::{self, StreamExt};

/// Default number of findings enriched at the same time
pub const DEFAULT_ENRICHMENT_CONCURRENCY: usize = 8;

/// Enrichments for a batch of findings, index-aligned with the input
#[derive(Debug, Clone, Default)]
pub struct EnrichmentBatch {
    pub enrichments: Vec<Enrichment>,
    /// One entry per absorbed lookup failure
    pub warnings: Vec<String>,
}

/// FindingEnricher - attaches a CVE id and exploit information to findings
///
/// The CVE id is read from the headline of the finding's source page; exploit
/// information is looked up by that id. Every failure degrades to "N/A" and
/// is returned as a warning instead of failing the run.
pub struct FindingEnricher<AR, EL> {
    advisories: AR,
    exploits: EL,
    concurrency: usize,
}

impl<AR: AdvisoryRepository, EL: ExploitLookup> FindingEnricher<AR, EL> {
    pub fn new(advisories: AR, exploits: EL, concurrency: usize) -> Self {
        Self {
            advisories,
            exploits,
            concurrency: concurrency.max(1),
        }
    }

    /// Enriches `findings` with bounded concurrency, keeping their order
    pub async fn enrich<PR: ProgressReporter>(
        &self,
        findings: &[RawFinding],
        reporter: &PR,
    ) -> EnrichmentBatch {
        let total = findings.len();
        let mut batch = EnrichmentBatch {
            enrichments: Vec::with_capacity(total),
            warnings: Vec::new(),
        };
        if total == 0 {
            return batch;
        }

        let mut results = std::pin::pin!(stream::iter(findings)
            .map(|finding| self.enrich_one(finding))
            .buffered(self.concurrency));

        while let Some((enrichment, warnings)) = results.next().await {
            for warning in &warnings {
                reporter.report_warning(warning);
            }
            batch.enrichments.push(enrichment);
            batch.warnings.extend(warnings);
            reporter.report_progress(
                batch.enrichments.len(),
                total,
                Some("Resolving CVE ids and exploits"),
            );
        }

        batch
    }

    async fn enrich_one(&self, finding: &RawFinding) -> (Enrichment, Vec<String>) {
        let mut warnings = Vec::new();
        let finding_id = finding.id_or_na();

        let cve_id = match self.resolve_cve_id(&finding.source_url()).await {
            Ok(Some(cve)) => cve.as_str().to_string(),
            Ok(None) => NOT_AVAILABLE.to_string(),
            Err(e) => {
                warnings.push(format!(
                    "Could not resolve CVE id for {}: {:#}",
                    finding_id, e
                ));
                NOT_AVAILABLE.to_string()
            }
        };

        let exploit_info = if cve_id == NOT_AVAILABLE {
            NOT_AVAILABLE.to_string()
        } else {
            match self.exploits.lookup(&cve_id).await {
                Ok(Some(info)) if !info.trim().is_empty() => info,
                Ok(_) => NOT_AVAILABLE.to_string(),
                Err(e) => {
                    warnings.push(format!("Exploit lookup failed for {}: {:#}", cve_id, e));
                    NOT_AVAILABLE.to_string()
                }
            }
        };

        (Enrichment::new(cve_id, exploit_info), warnings)
    }

    /// `Ok(None)` when the source is missing or the page names no CVE
    async fn resolve_cve_id(&self, source_url: &str) -> crate::shared::Result<Option<CveId>> {
        if source_url == NOT_AVAILABLE || validate_http_url(source_url).is_err() {
            return Ok(None);
        }
        let heading = self.advisories.fetch_heading(source_url).await?;
        Ok(heading.as_deref().and_then(CveId::find_in))
    }
}
