mod cli;

use cli::{Args, Command};
use conspector::adapters::outbound::console::StderrProgressReporter;
use conspector::adapters::outbound::filesystem::{FileSystemReader, ReportFileWriter};
use conspector::adapters::outbound::network::{
    AdvisoryPageClient, CachingAdvisoryRepository, GitHubCommitSource,
};
use conspector::adapters::outbound::process::{
    CommandRunner, GitCloner, GrypeScanner, PipreqsManifestRegenerator, SearchsploitLookup,
    SyftSbomTool,
};
use conspector::application::dto::{FailureReason, PipelineOutcome, ScanRequest, TriggerContext};
use conspector::application::use_cases::{PipelineAdapters, PipelineOptions, ProcessCommitUseCase};
use conspector::config::{
    discover_config, load_config_from_path, load_dotenv, AppConfig, ConfigOverrides,
};
use conspector::ports::outbound::CommitSource;
use conspector::shared::error::ExitCode;
use conspector::shared::Result;
use std::path::Path;
use std::process;

type Pipeline = ProcessCommitUseCase<
    GitCloner,
    PipreqsManifestRegenerator,
    SyftSbomTool,
    GrypeScanner,
    CachingAdvisoryRepository<AdvisoryPageClient>,
    SearchsploitLookup,
    ReportFileWriter,
    StderrProgressReporter,
>;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };

    process::exit(exit_code.as_i32());
}

async fn run() -> Result<ExitCode> {
    // Invalid arguments exit with code 2 inside clap
    let args = Args::parse_args();

    load_dotenv(args.env_file.as_deref())?;
    let config = load_app_config(&args)?;

    match args.command {
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config.redacted())?);
            Ok(ExitCode::Success)
        }
        Command::Run {
            repo_url,
            branch,
            commit,
        } => execute(&config, ScanRequest::manual(repo_url, branch, commit)).await,
        Command::ProcessLatest { branch } => process_latest(&config, branch).await,
        Command::PushEvent { payload } => push_event(&config, payload.as_deref()).await,
    }
}

fn load_app_config(args: &Args) -> Result<AppConfig> {
    let file = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => discover_config(&std::env::current_dir()?)?.unwrap_or_default(),
    };
    let overrides = ConfigOverrides {
        report_output_dir: args.report_dir.clone(),
    };

    AppConfig::resolve(file, |key| std::env::var(key).ok(), &overrides)
}

async fn process_latest(config: &AppConfig, branch: Option<String>) -> Result<ExitCode> {
    let (owner, repo) = config.github_repository()?;
    let branch = branch.unwrap_or_else(|| config.github.branch.clone());

    let commit_source = GitHubCommitSource::new(config.github.token.clone())?;
    match commit_source.fetch_branch_head(owner, repo, &branch).await {
        Ok(head) => execute(config, ScanRequest::from_branch_head(&head)).await,
        Err(e) => {
            let message = format!("{:#}", e);
            eprintln!("❌ {}", message);
            let context = TriggerContext {
                commit: None,
                branch,
                repository_url: format!("https://github.com/{}/{}", owner, repo),
            };
            emit(PipelineOutcome::rejected(
                context,
                FailureReason::CommitSourceFetch,
                message,
            ))
        }
    }
}

async fn push_event(config: &AppConfig, payload_path: Option<&Path>) -> Result<ExitCode> {
    let request = read_payload(payload_path)
        .and_then(|payload| Ok(ScanRequest::from_push_event(&payload)?));

    match request {
        Ok(request) => execute(config, request).await,
        Err(e) => {
            let message = format!("{:#}", e);
            eprintln!("❌ {}", message);
            let context = TriggerContext {
                commit: None,
                branch: String::new(),
                repository_url: String::new(),
            };
            emit(PipelineOutcome::rejected(
                context,
                FailureReason::InvalidTrigger,
                message,
            ))
        }
    }
}

/// Reads the push-event payload from `path`, or stdin when no path is given
fn read_payload(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => FileSystemReader::new().read_text(path, "push-event payload"),
        None => Ok(std::io::read_to_string(std::io::stdin())?),
    }
}

async fn execute(config: &AppConfig, request: ScanRequest) -> Result<ExitCode> {
    let pipeline = build_pipeline(config)?;
    let outcome = pipeline.execute(request).await;
    emit(outcome)
}

/// Wires the production adapters (Dependency Injection)
fn build_pipeline(config: &AppConfig) -> Result<Pipeline> {
    let runner = CommandRunner::new(config.tool_timeout);

    let exploits = match &config.searchsploit_tool_path {
        Some(path) => SearchsploitLookup::new(path.clone(), runner.clone()),
        None => SearchsploitLookup::disabled(),
    };

    let adapters = PipelineAdapters {
        cloner: GitCloner::new(config.git_tool_path.clone(), runner.clone()),
        manifest_regenerator: PipreqsManifestRegenerator::new(
            config.pipreqs_tool_path.clone(),
            config.pip_tool_path.clone(),
            runner.clone(),
        ),
        sbom_tool: SyftSbomTool::new(config.sbom_tool_path.clone(), runner.clone()),
        scanner: GrypeScanner::new(config.grype_tool_path.clone(), runner),
        advisories: CachingAdvisoryRepository::new(AdvisoryPageClient::new()?),
        exploits,
        report_writer: ReportFileWriter::new(),
    };

    let options = PipelineOptions {
        staging_root: config.report_output_dir.clone(),
        enrichment_concurrency: config.enrichment_concurrency,
        zero_advisory_policy: config.zero_advisory_policy,
    };

    Ok(ProcessCommitUseCase::new(
        adapters,
        StderrProgressReporter::new(),
        options,
    ))
}

/// Prints the outcome document on stdout
fn emit(outcome: PipelineOutcome) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(&outcome.to_payload())?);
    Ok(outcome.exit_code())
}
