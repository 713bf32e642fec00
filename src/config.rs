//! Configuration for conspector.
//!
//! Settings come from four layers, lowest precedence first:
//! a YAML `conspector.config.yml` file, a `.env` file, the process
//! environment, and command-line flags. The `.env` file is loaded into the
//! process environment without overriding variables that are already set,
//! which is what puts it below the real environment.

use anyhow::{bail, Context};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::use_cases::DEFAULT_ENRICHMENT_CONCURRENCY;
use crate::scan_pipeline::policies::ZeroAdvisoryPolicy;
use crate::shared::error::PipelineError;
use crate::shared::security::validate_staging_root;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "conspector.config.yml";

const DEFAULT_GITHUB_BRANCH: &str = "master";
const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 600;
const REDACTED: &str = "********";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub report_output_dir: Option<PathBuf>,
    pub sbom_tool_path: Option<String>,
    pub grype_tool_path: Option<String>,
    pub git_tool_path: Option<String>,
    pub pipreqs_tool_path: Option<String>,
    pub pip_tool_path: Option<String>,
    pub searchsploit_tool_path: Option<String>,
    pub tool_timeout_secs: Option<u64>,
    pub enrichment_concurrency: Option<usize>,
    pub keep_zero_advisory_findings: Option<bool>,
    pub github: Option<GitHubSection>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// `github:` section of the configuration file.
#[derive(Debug, Deserialize, Default)]
pub struct GitHubSection {
    pub token: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub branch: Option<String>,
    pub secret: Option<String>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Loads a `.env` file into the process environment.
///
/// An explicit path must exist; the default `.env` lookup is silently
/// skipped when there is no such file.
pub fn load_dotenv(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to load environment file: {}", path.display()))?;
        }
        None => match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e).context("Failed to load .env file"),
        },
    }
    Ok(())
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.enrichment_concurrency == Some(0) {
        bail!(
            "Invalid config: enrichment_concurrency must be at least 1.\n\n\
             💡 Hint: Remove the field to use the default of {}.",
            DEFAULT_ENRICHMENT_CONCURRENCY
        );
    }
    if config.tool_timeout_secs == Some(0) {
        bail!(
            "Invalid config: tool_timeout_secs must be at least 1.\n\n\
             💡 Hint: Remove the field to use the default of {} seconds.",
            DEFAULT_TOOL_TIMEOUT_SECS
        );
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Values given on the command line; they win over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub report_output_dir: Option<PathBuf>,
}

/// GitHub settings used by the latest-commit trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubSettings {
    pub token: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub branch: String,
    /// Webhook secret; verified by the gateway in front of the pipeline,
    /// only displayed (redacted) here
    pub secret: Option<String>,
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub report_output_dir: PathBuf,
    pub sbom_tool_path: String,
    pub grype_tool_path: String,
    pub git_tool_path: String,
    pub pipreqs_tool_path: String,
    pub pip_tool_path: String,
    /// `None` disables exploit lookups
    pub searchsploit_tool_path: Option<String>,
    pub tool_timeout: Duration,
    pub enrichment_concurrency: usize,
    pub zero_advisory_policy: ZeroAdvisoryPolicy,
    pub github: GitHubSettings,
}

impl AppConfig {
    /// Merges the configuration layers.
    ///
    /// # Arguments
    /// * `file` - Parsed configuration file (or `ConfigFile::default()`)
    /// * `env` - Environment lookup; blank values count as unset
    /// * `overrides` - Command-line values
    ///
    /// # Errors
    /// Returns `PipelineError::MissingConfiguration` when no report directory
    /// is configured, `PipelineError::InvalidConfiguration` for values that do
    /// not parse, and `PipelineError::InvalidStagingRoot` when the report
    /// directory is unusable.
    pub fn resolve<F>(file: ConfigFile, env: F, overrides: &ConfigOverrides) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|value| !value.trim().is_empty());
        let github = file.github.unwrap_or_default();

        let report_output_dir = overrides
            .report_output_dir
            .clone()
            .or_else(|| env("REPORT_OUTPUT_DIR").map(PathBuf::from))
            .or(file.report_output_dir)
            .ok_or_else(|| PipelineError::MissingConfiguration {
                key: "REPORT_OUTPUT_DIR".to_string(),
                hint: format!(
                    "Set REPORT_OUTPUT_DIR in the environment or .env, add report_output_dir to {}, or pass --report-dir",
                    CONFIG_FILENAME
                ),
            })?;
        let report_output_dir = std::path::absolute(&report_output_dir).map_err(|e| {
            PipelineError::InvalidStagingRoot {
                path: report_output_dir.clone(),
                reason: format!("Failed to resolve absolute path: {}", e),
            }
        })?;
        validate_staging_root(&report_output_dir)?;

        let tool_timeout_secs = match env("TOOL_TIMEOUT_SECS") {
            Some(raw) => parse_positive::<u64>("TOOL_TIMEOUT_SECS", &raw)?,
            None => file.tool_timeout_secs.unwrap_or(DEFAULT_TOOL_TIMEOUT_SECS),
        };
        let enrichment_concurrency = match env("ENRICHMENT_CONCURRENCY") {
            Some(raw) => parse_positive::<usize>("ENRICHMENT_CONCURRENCY", &raw)?,
            None => file
                .enrichment_concurrency
                .unwrap_or(DEFAULT_ENRICHMENT_CONCURRENCY),
        };
        let keep_zero_advisory = match env("KEEP_ZERO_ADVISORY_FINDINGS") {
            Some(raw) => parse_flag("KEEP_ZERO_ADVISORY_FINDINGS", &raw)?,
            None => file.keep_zero_advisory_findings.unwrap_or(true),
        };

        Ok(Self {
            report_output_dir,
            sbom_tool_path: env("SBOM_TOOL_PATH")
                .or(file.sbom_tool_path)
                .unwrap_or_else(|| "syft".to_string()),
            grype_tool_path: env("GRYPE_TOOL_PATH")
                .or(file.grype_tool_path)
                .unwrap_or_else(|| "grype".to_string()),
            git_tool_path: env("GIT_TOOL_PATH")
                .or(file.git_tool_path)
                .unwrap_or_else(|| "git".to_string()),
            pipreqs_tool_path: env("PIPREQS_TOOL_PATH")
                .or(file.pipreqs_tool_path)
                .unwrap_or_else(|| "pipreqs".to_string()),
            pip_tool_path: env("PIP_TOOL_PATH")
                .or(file.pip_tool_path)
                .unwrap_or_else(|| "pip".to_string()),
            searchsploit_tool_path: env("SEARCHSPLOIT_TOOL_PATH").or(file.searchsploit_tool_path),
            tool_timeout: Duration::from_secs(tool_timeout_secs),
            enrichment_concurrency,
            zero_advisory_policy: ZeroAdvisoryPolicy::from_keep_flag(keep_zero_advisory),
            github: GitHubSettings {
                token: env("GITHUB_TOKEN").or(github.token),
                owner: env("GITHUB_OWNER").or(github.owner),
                repo: env("GITHUB_REPO").or(github.repo),
                branch: env("GITHUB_BRANCH")
                    .or(github.branch)
                    .unwrap_or_else(|| DEFAULT_GITHUB_BRANCH.to_string()),
                secret: env("GITHUB_SECRET").or(github.secret),
            },
        })
    }

    /// Owner and repository polled by the latest-commit trigger.
    pub fn github_repository(&self) -> Result<(&str, &str)> {
        let missing = |key: &str| PipelineError::MissingConfiguration {
            key: key.to_string(),
            hint: format!(
                "Set {} in the environment or .env, or add it under github: in {}",
                key, CONFIG_FILENAME
            ),
        };
        let owner = self.github.owner.as_deref().ok_or_else(|| missing("GITHUB_OWNER"))?;
        let repo = self.github.repo.as_deref().ok_or_else(|| missing("GITHUB_REPO"))?;
        Ok((owner, repo))
    }

    /// Configuration as JSON with secrets replaced by a placeholder.
    pub fn redacted(&self) -> Value {
        let redact = |secret: &Option<String>| secret.as_ref().map(|_| REDACTED);
        json!({
            "report_output_dir": self.report_output_dir,
            "sbom_tool_path": self.sbom_tool_path,
            "grype_tool_path": self.grype_tool_path,
            "git_tool_path": self.git_tool_path,
            "pipreqs_tool_path": self.pipreqs_tool_path,
            "pip_tool_path": self.pip_tool_path,
            "searchsploit_tool_path": self.searchsploit_tool_path,
            "tool_timeout_secs": self.tool_timeout.as_secs(),
            "enrichment_concurrency": self.enrichment_concurrency,
            "keep_zero_advisory_findings": self.zero_advisory_policy == ZeroAdvisoryPolicy::Preserve,
            "github": {
                "token": redact(&self.github.token),
                "owner": self.github.owner,
                "repo": self.github.repo,
                "branch": self.github.branch,
                "secret": redact(&self.github.secret),
            },
        })
    }
}

fn parse_positive<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr + PartialOrd + From<u8>,
{
    match raw.trim().parse::<T>() {
        Ok(value) if value >= T::from(1u8) => Ok(value),
        _ => Err(PipelineError::InvalidConfiguration {
            key: key.to_string(),
            value: raw.to_string(),
            reason: "expected a positive integer".to_string(),
        }
        .into()),
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(PipelineError::InvalidConfiguration {
            key: key.to_string(),
            value: raw.to_string(),
            reason: "expected true or false".to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
report_output_dir: /srv/reports
sbom_tool_path: /opt/syft/syft
tool_timeout_secs: 120
enrichment_concurrency: 4
keep_zero_advisory_findings: false
github:
  owner: acme
  repo: shop
  branch: main
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.report_output_dir, Some(PathBuf::from("/srv/reports")));
        assert_eq!(config.sbom_tool_path.as_deref(), Some("/opt/syft/syft"));
        assert_eq!(config.tool_timeout_secs, Some(120));
        assert_eq!(config.enrichment_concurrency, Some(4));
        assert_eq!(config.keep_zero_advisory_findings, Some(false));
        let github = config.github.unwrap();
        assert_eq!(github.owner.as_deref(), Some("acme"));
        assert_eq!(github.branch.as_deref(), Some("main"));
        assert!(github.token.is_none());
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "grype_tool_path: /usr/bin/grype\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.grype_tool_path.as_deref(), Some("/usr/bin/grype"));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_zero_concurrency_validation_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "enrichment_concurrency: 0\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("enrichment_concurrency must be at least 1"));
    }

    #[test]
    fn test_unknown_fields_warning() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "format: json\nunknown_field: true\n").unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("unknown_field"));
    }

    #[test]
    fn test_resolve_defaults() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_string_lossy().into_owned();

        let config = AppConfig::resolve(
            ConfigFile::default(),
            env_from(&[("REPORT_OUTPUT_DIR", root.as_str())]),
            &ConfigOverrides::default(),
        )
        .unwrap();

        assert_eq!(config.report_output_dir, dir.path());
        assert_eq!(config.sbom_tool_path, "syft");
        assert_eq!(config.grype_tool_path, "grype");
        assert_eq!(config.git_tool_path, "git");
        assert_eq!(config.pipreqs_tool_path, "pipreqs");
        assert_eq!(config.pip_tool_path, "pip");
        assert!(config.searchsploit_tool_path.is_none());
        assert_eq!(config.tool_timeout, Duration::from_secs(600));
        assert_eq!(config.enrichment_concurrency, 8);
        assert_eq!(config.zero_advisory_policy, ZeroAdvisoryPolicy::Preserve);
        assert_eq!(config.github.branch, "master");
    }

    #[test]
    fn test_resolve_precedence() {
        let file_dir = TempDir::new().unwrap();
        let env_dir = TempDir::new().unwrap();
        let flag_dir = TempDir::new().unwrap();
        let file = ConfigFile {
            report_output_dir: Some(file_dir.path().to_path_buf()),
            sbom_tool_path: Some("/file/syft".to_string()),
            grype_tool_path: Some("/file/grype".to_string()),
            ..Default::default()
        };
        let env_root = env_dir.path().to_string_lossy().into_owned();
        let env = env_from(&[
            ("REPORT_OUTPUT_DIR", env_root.as_str()),
            ("SBOM_TOOL_PATH", "/env/syft"),
            ("GRYPE_TOOL_PATH", "   "),
        ]);

        let from_env = AppConfig::resolve(file, &env, &ConfigOverrides::default()).unwrap();
        assert_eq!(from_env.report_output_dir, env_dir.path());
        assert_eq!(from_env.sbom_tool_path, "/env/syft");
        // Blank environment values fall through to the file
        assert_eq!(from_env.grype_tool_path, "/file/grype");

        let overrides = ConfigOverrides {
            report_output_dir: Some(flag_dir.path().to_path_buf()),
        };
        let from_flag = AppConfig::resolve(ConfigFile::default(), &env, &overrides).unwrap();
        assert_eq!(from_flag.report_output_dir, flag_dir.path());
    }

    #[test]
    fn test_resolve_missing_report_dir() {
        let err = AppConfig::resolve(ConfigFile::default(), env_from(&[]), &ConfigOverrides::default())
            .unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("Missing required configuration: REPORT_OUTPUT_DIR"));
    }

    #[test]
    fn test_resolve_nonexistent_report_dir() {
        let err = AppConfig::resolve(
            ConfigFile::default(),
            env_from(&[("REPORT_OUTPUT_DIR", "/nonexistent/conspector/reports")]),
            &ConfigOverrides::default(),
        )
        .unwrap_err();
        assert!(format!("{}", err).contains("Invalid staging root"));
    }

    #[test]
    fn test_resolve_invalid_numbers_and_flags() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_string_lossy().into_owned();

        for (key, value) in [
            ("TOOL_TIMEOUT_SECS", "0"),
            ("TOOL_TIMEOUT_SECS", "soon"),
            ("ENRICHMENT_CONCURRENCY", "-3"),
            ("KEEP_ZERO_ADVISORY_FINDINGS", "maybe"),
        ] {
            let err = AppConfig::resolve(
                ConfigFile::default(),
                env_from(&[("REPORT_OUTPUT_DIR", root.as_str()), (key, value)]),
                &ConfigOverrides::default(),
            )
            .unwrap_err();
            assert!(format!("{}", err).contains(key), "{}={}", key, value);
        }
    }

    #[test]
    fn test_resolve_drop_policy() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_string_lossy().into_owned();

        let config = AppConfig::resolve(
            ConfigFile::default(),
            env_from(&[("REPORT_OUTPUT_DIR", root.as_str()), ("KEEP_ZERO_ADVISORY_FINDINGS", "false")]),
            &ConfigOverrides::default(),
        )
        .unwrap();

        assert_eq!(config.zero_advisory_policy, ZeroAdvisoryPolicy::Drop);
    }

    #[test]
    fn test_redacted_hides_secrets() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let config = AppConfig::resolve(
            ConfigFile::default(),
            env_from(&[
                ("REPORT_OUTPUT_DIR", root.as_str()),
                ("GITHUB_TOKEN", "ghp_supersecret"),
                ("GITHUB_SECRET", "hook-secret"),
                ("GITHUB_OWNER", "acme"),
            ]),
            &ConfigOverrides::default(),
        )
        .unwrap();

        let redacted = config.redacted();
        let rendered = redacted.to_string();

        assert_eq!(redacted["github"]["token"], REDACTED);
        assert_eq!(redacted["github"]["secret"], REDACTED);
        assert_eq!(redacted["github"]["owner"], "acme");
        assert!(redacted["github"]["repo"].is_null());
        assert!(!rendered.contains("ghp_supersecret"));
        assert!(!rendered.contains("hook-secret"));
    }

    #[test]
    fn test_github_repository_requires_owner_and_repo() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let config = AppConfig::resolve(
            ConfigFile::default(),
            env_from(&[("REPORT_OUTPUT_DIR", root.as_str()), ("GITHUB_OWNER", "acme")]),
            &ConfigOverrides::default(),
        )
        .unwrap();

        let err = config.github_repository().unwrap_err();
        assert!(format!("{}", err).contains("GITHUB_REPO"));
    }
}
