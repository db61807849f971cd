//! Object upload boundary for site assets (hero images).
//!
//! The returned URL is an opaque string; it is written into the content
//! document through the same path-update mechanism as any other field.

use crate::store::StoreError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

#[allow(async_fn_in_trait)]
pub trait ObjectStore {
    /// Upload a blob, returning its public URL.
    async fn upload(&self, bytes: &[u8], suggested_name: &str) -> Result<String, StoreError>;
}

/// In-memory object store for tests and local development.
pub struct MemoryObjectStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
    counter: AtomicU64,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            counter: AtomicU64::new(0),
        }
    }

    pub async fn get(&self, url: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(url).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for MemoryObjectStore {
    async fn upload(&self, bytes: &[u8], suggested_name: &str) -> Result<String, StoreError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let url = format!("mem://uploads/{}-{}", n, sanitize(suggested_name));
        self.objects
            .write()
            .await
            .insert(url.clone(), bytes.to_vec());
        tracing::debug!("stored {} bytes at {}", bytes.len(), url);
        Ok(url)
    }
}

/// Keep only characters safe in an object key.
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '-'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
