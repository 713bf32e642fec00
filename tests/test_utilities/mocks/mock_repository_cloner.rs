use super::{record, CallLog};
use async_trait::async_trait;
use conspector::prelude::*;
use std::fs;
use std::path::Path;

/// Mock RepositoryCloner that creates the checkout directory with fixed files
pub struct MockRepositoryCloner {
    log: CallLog,
    files: Vec<(String, String)>,
    should_fail: bool,
}

impl MockRepositoryCloner {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            files: Vec::new(),
            should_fail: false,
        }
    }

    pub fn with_file(mut self, name: &str, content: &str) -> Self {
        self.files.push((name.to_string(), content.to_string()));
        self
    }

    pub fn with_failure(log: &CallLog) -> Self {
        Self {
            should_fail: true,
            ..Self::new(log)
        }
    }
}

#[async_trait]
impl RepositoryCloner for MockRepositoryCloner {
    async fn shallow_clone(&self, clone_url: &str, branch: &str, target: &Path) -> Result<()> {
        record(&self.log, &format!("clone {} {}", clone_url, branch));
        if self.should_fail {
            anyhow::bail!("Mock clone failure: repository not found");
        }
        fs::create_dir_all(target)?;
        for (name, content) in &self.files {
            fs::write(target.join(name), content)?;
        }
        Ok(())
    }
}
