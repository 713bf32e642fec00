/// End-to-end tests for the CLI
///
/// Each test runs the binary inside its own temporary directory with every
/// configuration variable removed, so nothing from the host leaks in.
use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONFIG_VARS: &[&str] = &[
    "REPORT_OUTPUT_DIR",
    "SBOM_TOOL_PATH",
    "GRYPE_TOOL_PATH",
    "GIT_TOOL_PATH",
    "PIPREQS_TOOL_PATH",
    "PIP_TOOL_PATH",
    "SEARCHSPLOIT_TOOL_PATH",
    "TOOL_TIMEOUT_SECS",
    "ENRICHMENT_CONCURRENCY",
    "KEEP_ZERO_ADVISORY_FINDINGS",
    "GITHUB_TOKEN",
    "GITHUB_OWNER",
    "GITHUB_REPO",
    "GITHUB_BRANCH",
    "GITHUB_SECRET",
];

fn conspector(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("conspector");
    cmd.current_dir(dir);
    for var in CONFIG_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        let dir = TempDir::new().unwrap();
        conspector(dir.path())
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("process-latest"))
            .stdout(predicate::str::contains("push-event"));
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        let dir = TempDir::new().unwrap();
        conspector(dir.path()).arg("--version").assert().code(0);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        let dir = TempDir::new().unwrap();
        conspector(dir.path())
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Missing required option of a subcommand
    #[test]
    fn test_exit_code_run_without_branch() {
        let dir = TempDir::new().unwrap();
        conspector(dir.path())
            .args(["run", "--repo-url", "https://example.com/org/app"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - no staging root configured
    #[test]
    fn test_exit_code_missing_report_output_dir() {
        let dir = TempDir::new().unwrap();
        conspector(dir.path())
            .args(["run", "--repo-url", "https://example.com/org/app", "--branch", "main"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("REPORT_OUTPUT_DIR"));
    }

    /// Exit code 3: Application error - staging root does not exist
    #[test]
    fn test_exit_code_nonexistent_report_output_dir() {
        let dir = TempDir::new().unwrap();
        conspector(dir.path())
            .env("REPORT_OUTPUT_DIR", "/nonexistent/conspector/reports")
            .arg("config")
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Invalid staging root"));
    }

    /// Exit code 3: Application error - non-numeric concurrency
    #[test]
    fn test_exit_code_invalid_number() {
        let dir = TempDir::new().unwrap();
        conspector(dir.path())
            .env("REPORT_OUTPUT_DIR", dir.path())
            .env("ENRICHMENT_CONCURRENCY", "many")
            .arg("config")
            .assert()
            .code(3)
            .stderr(predicate::str::contains("ENRICHMENT_CONCURRENCY"));
    }

    /// Exit code 3: Application error - latest-commit trigger without a repository
    #[test]
    fn test_exit_code_process_latest_without_github_repository() {
        let dir = TempDir::new().unwrap();
        conspector(dir.path())
            .env("REPORT_OUTPUT_DIR", dir.path())
            .arg("process-latest")
            .assert()
            .code(3)
            .stderr(predicate::str::contains("GITHUB_OWNER"));
    }
}

mod config_command_tests {
    use super::*;

    #[test]
    fn test_config_redacts_secrets() {
        let dir = TempDir::new().unwrap();
        let output = conspector(dir.path())
            .env("REPORT_OUTPUT_DIR", dir.path())
            .env("GITHUB_TOKEN", "ghp_do_not_print_me")
            .env("GITHUB_SECRET", "webhook-secret-value")
            .env("GITHUB_OWNER", "acme")
            .arg("config")
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(0));
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(!stdout.contains("ghp_do_not_print_me"));
        assert!(!stdout.contains("webhook-secret-value"));

        let config = stdout_json(&output);
        assert_eq!(config["github"]["token"], "********");
        assert_eq!(config["github"]["secret"], "********");
        assert_eq!(config["github"]["owner"], "acme");
        assert_eq!(config["github"]["branch"], "master");
    }

    #[test]
    fn test_dotenv_file_is_loaded_from_working_directory() {
        let dir = TempDir::new().unwrap();
        let reports = dir.path().join("reports");
        fs::create_dir(&reports).unwrap();
        fs::write(
            dir.path().join(".env"),
            format!(
                "REPORT_OUTPUT_DIR={}\nGITHUB_BRANCH=develop\n",
                reports.display()
            ),
        )
        .unwrap();

        let output = conspector(dir.path()).arg("config").output().unwrap();

        assert_eq!(output.status.code(), Some(0));
        let config = stdout_json(&output);
        assert_eq!(config["report_output_dir"], &*reports.to_string_lossy());
        assert_eq!(config["github"]["branch"], "develop");
    }

    #[test]
    fn test_environment_wins_over_dotenv_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".env"),
            format!("REPORT_OUTPUT_DIR={}\nGITHUB_BRANCH=develop\n", dir.path().display()),
        )
        .unwrap();

        let output = conspector(dir.path())
            .env("GITHUB_BRANCH", "release")
            .arg("config")
            .output()
            .unwrap();

        assert_eq!(stdout_json(&output)["github"]["branch"], "release");
    }

    #[test]
    fn test_report_dir_flag_is_made_absolute() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("reports")).unwrap();

        let output = conspector(dir.path())
            .args(["config", "--report-dir", "reports"])
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(0));
        let report_dir = stdout_json(&output)["report_output_dir"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(Path::new(&report_dir).is_absolute());
        assert!(report_dir.ends_with("reports"));
    }
}

mod trigger_tests {
    use super::*;

    #[test]
    fn test_push_event_with_invalid_json_is_rejected() {
        let dir = TempDir::new().unwrap();
        let output = conspector(dir.path())
            .env("REPORT_OUTPUT_DIR", dir.path())
            .arg("push-event")
            .write_stdin("not json")
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(3));
        let payload = stdout_json(&output);
        assert_eq!(payload["status"], 400);
        assert_eq!(payload["stage"], "idle");
    }

    #[test]
    fn test_push_event_with_unreadable_payload_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let output = conspector(dir.path())
            .env("REPORT_OUTPUT_DIR", dir.path())
            .args(["push-event", "--payload", "missing-event.json"])
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(3));
        let payload = stdout_json(&output);
        assert_eq!(payload["status"], 400);
        assert_eq!(payload["stage"], "idle");
        assert!(payload["msg"]
            .as_str()
            .unwrap()
            .contains("missing-event.json"));
    }

    #[test]
    fn test_push_event_for_tag_is_rejected() {
        let dir = TempDir::new().unwrap();
        let event = dir.path().join("event.json");
        fs::write(
            &event,
            r#"{"ref": "refs/tags/v1.0.0", "repository": {"html_url": "https://example.com/org/app"}}"#,
        )
        .unwrap();

        let output = conspector(dir.path())
            .env("REPORT_OUTPUT_DIR", dir.path())
            .args(["push-event", "--payload"])
            .arg(&event)
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(3));
        let payload = stdout_json(&output);
        assert_eq!(payload["status"], 400);
        assert!(payload["msg"].as_str().unwrap().contains("refs/tags/v1.0.0"));
    }

    #[test]
    fn test_run_with_missing_git_fails_at_materializing() {
        let dir = TempDir::new().unwrap();
        let output = conspector(dir.path())
            .env("REPORT_OUTPUT_DIR", dir.path())
            .env("GIT_TOOL_PATH", "/nonexistent/bin/git")
            .args([
                "run",
                "--repo-url",
                "https://example.com/org/app",
                "--branch",
                "main",
                "--commit",
                "abc1234",
            ])
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        let payload = stdout_json(&output);
        assert_eq!(payload["status"], 500);
        assert_eq!(payload["stage"], "materializing");
        assert_eq!(payload["commit"], "abc1234");
        assert_eq!(payload["repo_url"], "https://example.com/org/app");
    }
}
