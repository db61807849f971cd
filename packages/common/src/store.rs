//! # Document Store Boundary
//!
//! The remote store is the single source of truth for persisted site
//! documents. This module defines the boundary trait plus two backings:
//!
//! - **Memory-backed**: for tests and ephemeral sessions, with injectable
//!   transport faults
//! - **File-backed**: one JSON file per tenant, for local development
//!
//! Writes are whole-document replaces, last-write-wins at the storage
//! layer; no optimistic-concurrency token is used. A write to an unknown
//! site id creates it (sites come into being on first save).

use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;
use tokio::sync::RwLock;

use sitewright_content::Website;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Remote document store for site documents.
///
/// Every method suspends at the transport; callers observe exactly one
/// await point per store round-trip.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// Fetch the site owned by `site_id`.
    async fn fetch(&self, site_id: &str) -> Result<Website, StoreError>;

    /// Replace the whole content document, creating the site on first save.
    async fn write(&self, site_id: &str, content: Value) -> Result<Website, StoreError>;

    /// Flip the published flag. Idempotent state-wise, but always restamps
    /// `published_at`.
    async fn set_published(&self, site_id: &str, published: bool) -> Result<Website, StoreError>;

    /// Public lookup by subdomain slug.
    async fn find_by_path(&self, path: &str) -> Result<Website, StoreError>;
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[derive(Default)]
struct Faults {
    fail_fetch: bool,
    fail_write: bool,
}

/// In-memory store for tests and ephemeral sessions.
pub struct MemoryDocumentStore {
    sites: RwLock<HashMap<String, Website>>,
    faults: Mutex<Faults>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            sites: RwLock::new(HashMap::new()),
            faults: Mutex::new(Faults::default()),
        }
    }

    /// Seed a site directly (test setup).
    pub async fn insert(&self, site: Website) {
        self.sites.write().await.insert(site.id.clone(), site);
    }

    /// Make the next `fetch` fail with a transport error.
    pub fn fail_next_fetch(&self) {
        self.faults.lock().unwrap().fail_fetch = true;
    }

    /// Make the next `write` fail with a transport error.
    pub fn fail_next_write(&self) {
        self.faults.lock().unwrap().fail_write = true;
    }

    fn take_fault(&self, write: bool) -> bool {
        let mut faults = self.faults.lock().unwrap();
        if write {
            std::mem::take(&mut faults.fail_write)
        } else {
            std::mem::take(&mut faults.fail_fetch)
        }
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryDocumentStore {
    async fn fetch(&self, site_id: &str) -> Result<Website, StoreError> {
        if self.take_fault(false) {
            return Err(StoreError::Transport("injected fetch failure".to_string()));
        }

        self.sites
            .read()
            .await
            .get(site_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(site_id.to_string()))
    }

    async fn write(&self, site_id: &str, content: Value) -> Result<Website, StoreError> {
        if self.take_fault(true) {
            return Err(StoreError::Transport("injected write failure".to_string()));
        }

        let mut sites = self.sites.write().await;
        let site = sites
            .entry(site_id.to_string())
            .or_insert_with(|| Website::new(site_id, Value::Null));
        site.content = content;
        site.updated_at = now_millis();
        tracing::debug!("wrote document for site {}", site_id);
        Ok(site.clone())
    }

    async fn set_published(&self, site_id: &str, published: bool) -> Result<Website, StoreError> {
        let mut sites = self.sites.write().await;
        let site = sites
            .get_mut(site_id)
            .ok_or_else(|| StoreError::NotFound(site_id.to_string()))?;
        site.published = published;
        site.published_at = Some(now_millis());
        site.updated_at = now_millis();
        Ok(site.clone())
    }

    async fn find_by_path(&self, path: &str) -> Result<Website, StoreError> {
        self.sites
            .read()
            .await
            .values()
            .find(|site| site.path == path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }
}

/// File-backed store: one JSON file per tenant under `root`.
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn site_file(&self, site_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", site_id))
    }

    fn read_site(&self, site_id: &str) -> Result<Website, StoreError> {
        let path = self.site_file(site_id);
        let source = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(site_id.to_string())
            } else {
                StoreError::Io(e)
            }
        })?;
        Ok(serde_json::from_str(&source)?)
    }

    fn write_site(&self, site: &Website) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.root)?;
        let source = serde_json::to_string_pretty(site)?;
        std::fs::write(self.site_file(&site.id), source)?;
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    async fn fetch(&self, site_id: &str) -> Result<Website, StoreError> {
        self.read_site(site_id)
    }

    async fn write(&self, site_id: &str, content: Value) -> Result<Website, StoreError> {
        let mut site = match self.read_site(site_id) {
            Ok(site) => site,
            Err(StoreError::NotFound(_)) => Website::new(site_id, Value::Null),
            Err(e) => return Err(e),
        };
        site.content = content;
        site.updated_at = now_millis();
        self.write_site(&site)?;
        tracing::debug!("wrote {}", self.site_file(site_id).display());
        Ok(site)
    }

    async fn set_published(&self, site_id: &str, published: bool) -> Result<Website, StoreError> {
        let mut site = self.read_site(site_id)?;
        site.published = published;
        site.published_at = Some(now_millis());
        site.updated_at = now_millis();
        self.write_site(&site)?;
        Ok(site)
    }

    async fn find_by_path(&self, path: &str) -> Result<Website, StoreError> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(path.to_string()));
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        for entry in entries {
            let entry = entry?;
            let file = entry.path();
            if file.extension().map(|e| e == "json").unwrap_or(false) {
                let source = std::fs::read_to_string(&file)?;
                let site: Website = serde_json::from_str(&source)?;
                if site.path == path {
                    return Ok(site);
                }
            }
        }

        Err(StoreError::NotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_memory_store_write_creates_site() {
        let store = MemoryDocumentStore::new();

        let site = store
            .write("tenant-1", json!({ "businessName": "Acme" }))
            .await
            .unwrap();

        assert_eq!(site.id, "tenant-1");
        assert_eq!(site.content["businessName"], "Acme");
        assert!(site.updated_at > 0);

        let fetched = store.fetch("tenant-1").await.unwrap();
        assert_eq!(fetched.content, site.content);
    }

    #[tokio::test]
    async fn test_memory_store_fetch_missing() {
        let store = MemoryDocumentStore::new();
        let result = store.fetch("nobody").await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_memory_store_injected_faults() {
        let store = MemoryDocumentStore::new();
        store.insert(Website::new("tenant-1", json!({}))).await;

        store.fail_next_fetch();
        assert!(matches!(
            store.fetch("tenant-1").await,
            Err(StoreError::Transport(_))
        ));
        // Fault is consumed
        assert!(store.fetch("tenant-1").await.is_ok());

        store.fail_next_write();
        assert!(matches!(
            store.write("tenant-1", json!({})).await,
            Err(StoreError::Transport(_))
        ));
        assert!(store.write("tenant-1", json!({})).await.is_ok());
    }

    #[tokio::test]
    async fn test_memory_store_publish_restamps() {
        let store = MemoryDocumentStore::new();
        store.write("tenant-1", json!({})).await.unwrap();

        let first = store.set_published("tenant-1", true).await.unwrap();
        assert!(first.published);
        let stamp = first.published_at.unwrap();

        // Publishing again is a state no-op but still records a timestamp
        let second = store.set_published("tenant-1", true).await.unwrap();
        assert!(second.published);
        assert!(second.published_at.unwrap() >= stamp);
    }

    #[tokio::test]
    async fn test_memory_store_find_by_path() {
        let store = MemoryDocumentStore::new();
        store.write("Acme Plumbing", json!({})).await.unwrap();

        let site = store.find_by_path("acme-plumbing").await.unwrap();
        assert_eq!(site.tenant, "Acme Plumbing");

        assert!(matches!(
            store.find_by_path("no-such-site").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let written = store
            .write("tenant-1", json!({ "businessName": "Acme" }))
            .await
            .unwrap();
        assert_eq!(written.content["businessName"], "Acme");

        let fetched = store.fetch("tenant-1").await.unwrap();
        assert_eq!(fetched, written);

        let by_path = store.find_by_path("tenant-1").await.unwrap();
        assert_eq!(by_path.id, "tenant-1");
    }

    #[tokio::test]
    async fn test_file_store_missing_site() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        assert!(matches!(
            store.fetch("nobody").await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.set_published("nobody", true).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_file_store_publish_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.write("tenant-1", json!({})).await.unwrap();

        store.set_published("tenant-1", true).await.unwrap();
        let site = store.fetch("tenant-1").await.unwrap();
        assert!(site.published);
        assert!(site.published_at.is_some());
    }
}
