use super::CommandRunner;
use crate::ports::outbound::ExploitLookup;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SearchResults {
    #[serde(rename = "RESULTS_EXPLOIT", default)]
    exploits: Vec<ExploitEntry>,
}

#[derive(Debug, Deserialize)]
struct ExploitEntry {
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "EDB-ID", default)]
    edb_id: String,
}

/// SearchsploitLookup adapter querying the local Exploit-DB mirror
///
/// Built without an executable (`disabled()`), every lookup returns `None`,
/// which the report shows as "N/A".
pub struct SearchsploitLookup {
    searchsploit_path: Option<String>,
    runner: CommandRunner,
}

impl SearchsploitLookup {
    pub fn new(searchsploit_path: impl Into<String>, runner: CommandRunner) -> Self {
        Self {
            searchsploit_path: Some(searchsploit_path.into()),
            runner,
        }
    }

    pub fn disabled() -> Self {
        Self {
            searchsploit_path: None,
            runner: CommandRunner::default(),
        }
    }

    /// Formats search results as `Title (EDB-ID n)` entries separated by "; "
    fn summarize(stdout: &[u8]) -> Result<Option<String>> {
        let results: SearchResults = serde_json::from_slice(stdout)
            .map_err(|e| anyhow::anyhow!("Failed to parse searchsploit output: {}", e))?;

        let entries: Vec<String> = results
            .exploits
            .iter()
            .filter(|entry| !entry.title.trim().is_empty())
            .map(|entry| {
                if entry.edb_id.is_empty() {
                    entry.title.trim().to_string()
                } else {
                    format!("{} (EDB-ID {})", entry.title.trim(), entry.edb_id)
                }
            })
            .collect();

        if entries.is_empty() {
            Ok(None)
        } else {
            Ok(Some(entries.join("; ")))
        }
    }
}

#[async_trait]
impl ExploitLookup for SearchsploitLookup {
    async fn lookup(&self, cve_id: &str) -> Result<Option<String>> {
        let Some(program) = self.searchsploit_path.as_deref() else {
            return Ok(None);
        };
        let output = self.runner.run(program, ["--cve", cve_id, "-j"]).await?;
        Self::summarize(&output.stdout)
    }
}
