use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Clone a branch, generate its SBOM, scan it for vulnerabilities and
/// export an enriched report
#[derive(Parser, Debug)]
#[command(name = "conspector")]
#[command(version)]
#[command(about = "Commit-to-report vulnerability pipeline", long_about = None)]
pub struct Args {
    /// Path to a YAML configuration file (defaults to ./conspector.config.yml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to a .env file (defaults to ./.env when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Staging root for run directories, overrides REPORT_OUTPUT_DIR
    #[arg(short, long, global = true, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Scan a repository branch given on the command line
    Run {
        /// Browse or clone URL of the repository
        #[arg(long, value_name = "URL")]
        repo_url: String,

        /// Branch to scan
        #[arg(short, long)]
        branch: String,

        /// Commit that triggered the run, echoed in the outcome
        #[arg(long, value_name = "SHA")]
        commit: Option<String>,
    },

    /// Scan the head commit of the configured GitHub branch
    ProcessLatest {
        /// Branch to poll, overrides GITHUB_BRANCH
        #[arg(short, long)]
        branch: Option<String>,
    },

    /// Scan the branch named by a push-event payload
    PushEvent {
        /// JSON payload file; read from stdin when omitted
        #[arg(short, long, value_name = "FILE")]
        payload: Option<PathBuf>,
    },

    /// Print the resolved configuration with secrets redacted
    Config,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
