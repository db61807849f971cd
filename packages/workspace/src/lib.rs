//! # Sitewright Workspace
//!
//! Editing session coordination over the document store.
//!
//! A [`Workspace`] bundles the store, the per-site cache, and the event
//! channel. Each signed-in tenant opens an [`EditingSession`] whose draft
//! is seeded from the remote document; every explicit save merges exactly
//! one field path into the *freshly fetched* remote document, so saves to
//! different paths never clobber each other even across browser tabs.
//!
//! ```text
//! UI field change → draft update (local, synchronous)
//!                 → explicit save
//!                 → fetch current remote document
//!                 → apply path update to the fetched document
//!                 → write merged document back
//!                 → refresh draft + cache, emit event
//! ```

pub mod context;
pub mod events;
pub mod field;
pub mod publish;
pub mod session;
pub mod state;

pub use context::{Identity, SessionContext, UserProfile};
pub use events::{SiteEvent, SiteEvents};
pub use field::{FieldEditor, FieldState};
pub use session::{EditingSession, SessionError, Workspace};
pub use state::{SiteState, WorkspaceState};
