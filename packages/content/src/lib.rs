//! # Sitewright Content
//!
//! Core document engine for tenant site content.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: stored JSON → materialized document  │
//! │  - Canonical content shape + defaults       │
//! │  - Read-repair merge for legacy documents   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ paths: copy-on-write field updates          │
//! │  - set_path touches exactly one location    │
//! │  - siblings survive every update            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ mutations: ordered-list operations          │
//! │  - add / remove / update at index           │
//! │  - validated before any document work       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The store is source of truth**: drafts are derived views
//! 2. **Whole-document read-modify-write**: each save merges one path into
//!    the freshly fetched remote document
//! 3. **Read-repair over migration**: missing fields are filled from
//!    defaults at read time, never rewritten in place
//! 4. **Pure core**: nothing in this crate performs IO
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sitewright_content::{materialize, set_path, FieldPath};
//!
//! let doc = materialize(&stored);
//! let path = FieldPath::of("theme", &["primaryColor"]);
//! let updated = set_path(&doc, &path, serde_json::json!("#ff6600"));
//! ```

mod model;
mod mutations;
mod paths;
mod website;

pub use model::{
    default_content, materialize, ContactInfo, LeadForm, LeadFormFields, Theme, WebsiteContent,
};
pub use mutations::{mutate_array, ArrayOp, MutationError};
pub use paths::{get_path, set_path, FieldPath};
pub use website::Website;
