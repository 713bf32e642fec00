use crate::shared::Result;
use async_trait::async_trait;

/// ExploitLookup port for checking whether public exploits exist for a CVE
#[async_trait]
pub trait ExploitLookup: Send + Sync {
    /// Looks up exploits for `cve_id`
    ///
    /// # Returns
    /// Free-form description of the known exploits, `None` when there are none
    /// or the lookup is not configured
    async fn lookup(&self, cve_id: &str) -> Result<Option<String>>;
}
