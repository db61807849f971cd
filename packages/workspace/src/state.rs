use serde_json::Value;
use std::collections::HashMap;

// Per-site cached state
#[derive(Clone, Debug)]
pub struct SiteState {
    pub content: Value,
    pub version: u64,
}

// Workspace-level cache of materialized documents.
//
// Serves cached reads between saves; every successful save refreshes the
// entry (bumping its version), and `invalidate` drops it so the next read
// goes back to the store.
pub struct WorkspaceState {
    sites: HashMap<String, SiteState>,
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self {
            sites: HashMap::new(),
        }
    }

    // Refresh the cached document and return the new version
    pub fn update_site(&mut self, site_id: &str, content: Value) -> u64 {
        let version = self
            .sites
            .get(site_id)
            .map(|s| s.version + 1)
            .unwrap_or(0);

        self.sites
            .insert(site_id.to_string(), SiteState { content, version });

        version
    }

    pub fn get_site(&self, site_id: &str) -> Option<&SiteState> {
        self.sites.get(site_id)
    }

    pub fn invalidate(&mut self, site_id: &str) {
        self.sites.remove(site_id);
    }
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new()
    }
}
