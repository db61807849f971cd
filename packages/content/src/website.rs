//! Persisted website entity.
//!
//! One [`Website`] belongs to exactly one tenant profile and owns that
//! tenant's content document. It is created implicitly on first save and
//! never deleted by this engine. `content` is kept in raw stored form;
//! reads go through [`materialize`](crate::materialize).

use crate::model::materialize;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Website {
    /// Document id (one site per tenant, so this is the tenant profile id)
    pub id: String,

    /// Owning tenant profile id
    pub tenant: String,

    /// Subdomain slug used for public lookup
    pub path: String,

    /// Whether the site is publicly visible
    pub published: bool,

    /// Millisecond timestamp of the last publish/unpublish, if any
    pub published_at: Option<i64>,

    /// Millisecond timestamp of the last write
    pub updated_at: i64,

    /// Raw stored content document (possibly legacy-shaped)
    pub content: Value,
}

impl Website {
    /// New unpublished site for `tenant`, created on first save.
    pub fn new(tenant: impl Into<String>, content: Value) -> Self {
        let tenant = tenant.into();
        let path = slug(&tenant);
        Self {
            id: tenant.clone(),
            tenant,
            path,
            published: false,
            published_at: None,
            updated_at: 0,
            content,
        }
    }

    /// The content document with defaults merged in (read-repair).
    pub fn materialized(&self) -> Value {
        materialize(&self.content)
    }
}

/// Lowercase the tenant id into a subdomain-safe slug.
fn slug(tenant: &str) -> String {
    let mut out = String::with_capacity(tenant.len());
    for c in tenant.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_site_is_unpublished() {
        let site = Website::new("tenant-1", json!({}));
        assert_eq!(site.id, "tenant-1");
        assert_eq!(site.tenant, "tenant-1");
        assert!(!site.published);
        assert!(site.published_at.is_none());
    }

    #[test]
    fn test_slug_is_subdomain_safe() {
        let site = Website::new("Acme Plumbing & Sons", json!({}));
        assert_eq!(site.path, "acme-plumbing-sons");
    }

    #[test]
    fn test_materialized_fills_defaults() {
        let site = Website::new("tenant-1", json!({ "businessName": "Acme" }));
        let doc = site.materialized();
        assert_eq!(doc["businessName"], "Acme");
        assert_eq!(doc["theme"]["fontFamily"], "Inter");
    }
}
