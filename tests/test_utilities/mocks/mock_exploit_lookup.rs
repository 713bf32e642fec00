use async_trait::async_trait;
use conspector::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock ExploitLookup recording every queried CVE id
#[derive(Default)]
pub struct MockExploitLookup {
    exploits: HashMap<String, String>,
    pub queried: Arc<Mutex<Vec<String>>>,
}

impl MockExploitLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exploit(mut self, cve_id: &str, info: &str) -> Self {
        self.exploits.insert(cve_id.to_string(), info.to_string());
        self
    }
}

#[async_trait]
impl ExploitLookup for MockExploitLookup {
    async fn lookup(&self, cve_id: &str) -> Result<Option<String>> {
        self.queried.lock().unwrap().push(cve_id.to_string());
        Ok(self.exploits.get(cve_id).cloned())
    }
}
