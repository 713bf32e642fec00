use crate::application::dto::{
    FailureReason, PipelineFailure, PipelineOutcome, RunSummary, ScanRequest, TriggerContext,
};
use crate::application::read_models::ReportReadModelBuilder;
use crate::application::use_cases::{FindingEnricher, ManifestResolver, RepositoryMaterializer};
use crate::ports::outbound::{
    AdvisoryRepository, ExploitLookup, ManifestRegenerator, ProgressReporter, ReportWriter,
    RepositoryCloner, SbomTool, VulnerabilityScanner,
};
use crate::scan_pipeline::domain::{
    ManifestResolution, PipelineStage, RepositoryLocator, RunIdentity, StageOutcome,
    StageTracker, TICKET_EXPORT_FILE_NAME,
};
use crate::scan_pipeline::policies::ZeroAdvisoryPolicy;
use crate::shared::Result;
use std::path::PathBuf;


/// Settings of the pipeline that do not change between runs
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Absolute directory every run directory is created under
    pub staging_root: PathBuf,
    pub enrichment_concurrency: usize,
    pub zero_advisory_policy: ZeroAdvisoryPolicy,
}

/// Outbound adapters the pipeline is assembled from
///
/// # Type Parameters
/// * `CL` - RepositoryCloner implementation
/// * `MR` - ManifestRegenerator implementation
/// * `ST` - SbomTool implementation
/// * `VS` - VulnerabilityScanner implementation
/// * `AR` - AdvisoryRepository implementation
/// * `EL` - ExploitLookup implementation
/// * `RW` - ReportWriter implementation
pub struct PipelineAdapters<CL, MR, ST, VS, AR, EL, RW> {
    pub cloner: CL,
    pub manifest_regenerator: MR,
    pub sbom_tool: ST,
    pub scanner: VS,
    pub advisories: AR,
    pub exploits: EL,
    pub report_writer: RW,
}

/// Paths written by a run so far, reported even when a later stage fails
#[derive(Debug, Default)]
struct ProducedArtifacts {
    sbom_path: Option<PathBuf>,
    findings_path: Option<PathBuf>,
}

/// ProcessCommitUseCase - the commit-to-report pipeline
///
/// Runs the stages strictly in order:
/// materialize → resolve manifest → generate SBOM → scan → enrich → assemble.
/// Every fatal error is caught here and turned into a `PipelineOutcome`, so
/// `execute` never returns an error.
pub struct ProcessCommitUseCase<CL, MR, ST, VS, AR, EL, RW, PR> {
    materializer: RepositoryMaterializer<CL>,
    manifest_resolver: ManifestResolver<MR>,
    sbom_tool: ST,
    scanner: VS,
    enricher: FindingEnricher<AR, EL>,
    report_writer: RW,
    progress_reporter: PR,
    staging_root: PathBuf,
    zero_advisory_policy: ZeroAdvisoryPolicy,
}

impl<CL, MR, ST, VS, AR, EL, RW, PR> ProcessCommitUseCase<CL, MR, ST, VS, AR, EL, RW, PR>
where
    CL: RepositoryCloner,
    MR: ManifestRegenerator,
    ST: SbomTool,
    VS: VulnerabilityScanner,
    AR: AdvisoryRepository,
    EL: ExploitLookup,
    RW: ReportWriter,
    PR: ProgressReporter,
{
    /// Creates a new ProcessCommitUseCase with injected dependencies
    pub fn new(
        adapters: PipelineAdapters<CL, MR, ST, VS, AR, EL, RW>,
        progress_reporter: PR,
        options: PipelineOptions,
    ) -> Self {
        Self {
            materializer: RepositoryMaterializer::new(adapters.cloner),
            manifest_resolver: ManifestResolver::new(adapters.manifest_regenerator),
            sbom_tool: adapters.sbom_tool,
            scanner: adapters.scanner,
            enricher: FindingEnricher::new(
                adapters.advisories,
                adapters.exploits,
                options.enrichment_concurrency,
            ),
            report_writer: adapters.report_writer,
            progress_reporter,
            staging_root: options.staging_root,
            zero_advisory_policy: options.zero_advisory_policy,
        }
    }

    pub fn progress_reporter(&self) -> &PR {
        &self.progress_reporter
    }

    /// Executes one pipeline run
    ///
    /// # Arguments
    /// * `request` - What to scan; its timestamp keys the run directory
    ///
    /// # Returns
    /// `Success` with every artifact path, or `Failure` naming the stage
    /// that stopped the run and the artifacts produced before it
    pub async fn execute(&self, request: ScanRequest) -> PipelineOutcome {
        let context = TriggerContext::from(&request);

        let run = match Self::start_run(&request) {
            Ok(run) => run,
            Err(e) => {
                let message = format!("{:#}", e);
                self.progress_reporter
                    .report_error(&format!("❌ Invalid trigger: {}", message));
                return PipelineOutcome::rejected(context, FailureReason::InvalidTrigger, message);
            }
        };

        let mut tracker = StageTracker::new();
        let mut artifacts = ProducedArtifacts::default();

        match self
            .run_stages(&run, &context, &mut tracker, &mut artifacts)
            .await
        {
            Ok(summary) => PipelineOutcome::Success(summary),
            Err(e) => {
                let stage = tracker.current();
                let message = format!("{:#}", e);
                if tracker.advance(PipelineStage::Failed).is_ok() {
                    self.progress_reporter
                        .report(&format!("▶ Stage: {}", PipelineStage::Failed));
                }
                self.progress_reporter
                    .report_error(&format!("❌ Pipeline failed while {}: {}", stage, message));
                PipelineOutcome::Failure(PipelineFailure {
                    context,
                    reason: FailureReason::StageFailed,
                    stage,
                    message,
                    sbom_path: artifacts.sbom_path,
                    findings_path: artifacts.findings_path,
                })
            }
        }
    }

    fn start_run(request: &ScanRequest) -> Result<RunIdentity> {
        let locator = RepositoryLocator::parse(&request.repository_url)?;
        RunIdentity::new(locator, request.branch.clone(), request.started_at)
    }

    async fn run_stages(
        &self,
        run: &RunIdentity,
        context: &TriggerContext,
        tracker: &mut StageTracker,
        artifacts: &mut ProducedArtifacts,
    ) -> Result<RunSummary> {
        let mut warnings = Vec::new();

        // Stage 1: Materialize the checkout
        self.enter(tracker, PipelineStage::Materializing)?;
        let checkout = self
            .materializer
            .materialize(run, &self.staging_root, &self.progress_reporter)
            .await?;
        let staging_path = checkout.staging_path.clone();

        // Stage 2: Resolve the manifest (never fatal)
        self.enter(tracker, PipelineStage::ResolvingManifest)?;
        let manifest_resolution = match self
            .manifest_resolver
            .resolve(&checkout.checkout_path, &self.progress_reporter)
            .await
        {
            StageOutcome::Complete(resolution) => resolution,
            StageOutcome::Degraded { value, reason } => {
                warnings.push(reason);
                value
            }
            StageOutcome::Fatal(e) => {
                warnings.push(format!("{:#}", e));
                ManifestResolution::Unresolved
            }
        };

        // Stage 3: Generate the SBOM
        self.enter(tracker, PipelineStage::GeneratingSbom)?;
        let sbom_path = staging_path.join(run.sbom_file_name());
        self.sbom_tool
            .generate(&checkout.checkout_path, &sbom_path)
            .await?;
        artifacts.sbom_path = Some(sbom_path.clone());
        self.progress_reporter
            .report(&format!("✅ SBOM written to {}", sbom_path.display()));

        // Stage 4: Scan the SBOM
        self.enter(tracker, PipelineStage::Scanning)?;
        let findings_path = staging_path.join(run.findings_file_name());
        let document = self.scanner.scan(&sbom_path, &findings_path).await?;
        artifacts.findings_path = Some(findings_path.clone());
        self.progress_reporter.report(&format!(
            "✅ Scan complete: {} component(s), {} finding(s)",
            document.components.len(),
            document.vulnerabilities.len()
        ));

        // Stage 5: Enrich findings (absorbs its own failures)
        self.enter(tracker, PipelineStage::Enriching)?;
        let batch = self
            .enricher
            .enrich(&document.vulnerabilities, &self.progress_reporter)
            .await;
        warnings.extend(batch.warnings);

        // Stage 6: Assemble the report
        self.enter(tracker, PipelineStage::Assembling)?;
        let model =
            ReportReadModelBuilder::build(&document, &batch.enrichments, self.zero_advisory_policy);
        let report_path = staging_path.join(run.report_file_name());
        let ticket_export_path = staging_path.join(TICKET_EXPORT_FILE_NAME);
        self.report_writer.write_workbook(&model, &report_path)?;
        self.report_writer
            .write_ticket_export(&model.vulnerabilities, &ticket_export_path)?;

        self.enter(tracker, PipelineStage::Done)?;
        self.progress_reporter.report_completion(&format!(
            "✅ Report generated: {} ({} row(s))",
            report_path.display(),
            model.row_count()
        ));

        Ok(RunSummary {
            context: context.clone(),
            staging_path,
            sbom_path,
            findings_path,
            report_path,
            ticket_export_path,
            rows: model.row_count(),
            manifest_resolution,
            warnings,
        })
    }

    fn enter(&self, tracker: &mut StageTracker, stage: PipelineStage) -> Result<()> {
        tracker.advance(stage)?;
        self.progress_reporter
            .report(&format!("▶ Stage: {}", stage));
        Ok(())
    }
}
