//! # Editing Session Coordination
//!
//! An [`EditingSession`] owns the in-memory draft of one tenant's site
//! document for the duration of an editing session. The remote store stays
//! the single source of truth: each explicit save merges exactly one path
//! into the freshly fetched remote document (never the stale draft
//! baseline), so concurrent saves to unrelated fields survive each other.
//! Same-path concurrent saves are last-write-wins.
//!
//! The draft is discarded and re-seeded from the store whenever the remote
//! document is refetched (after every save and on [`EditingSession::refresh`]).

use serde_json::Value;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{debug, info, warn};

use sitewright_common::{DocumentStore, ObjectStore, StoreError};
use sitewright_content::{
    default_content, materialize, mutate_array, set_path, ArrayOp, FieldPath, MutationError,
    WebsiteContent,
};

use crate::context::SessionContext;
use crate::events::{SiteEvent, SiteEvents};
use crate::field::FieldEditor;
use crate::state::WorkspaceState;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("sign in to edit this site")]
    NotSignedIn,

    #[error("{0}")]
    Mutation(#[from] MutationError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Shared workspace: the store, the per-site cache, and the event channel.
pub struct Workspace<S> {
    store: Arc<S>,
    events: SiteEvents,
    state: Arc<Mutex<WorkspaceState>>,
}

impl<S> Clone for Workspace<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            events: self.events.clone(),
            state: self.state.clone(),
        }
    }
}

impl<S: DocumentStore> Workspace<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            events: SiteEvents::new(),
            state: Arc::new(Mutex::new(WorkspaceState::new())),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn events(&self) -> &SiteEvents {
        &self.events
    }

    /// Cached materialized document for a site, if any.
    pub fn cached(&self, site_id: &str) -> Option<Value> {
        self.state
            .lock()
            .unwrap()
            .get_site(site_id)
            .map(|s| s.content.clone())
    }

    /// Open an editing session for the signed-in tenant's site.
    ///
    /// A tenant without a stored site yet starts from the default document;
    /// the site itself comes into being on the first save.
    pub async fn open_session(&self, ctx: &SessionContext) -> Result<EditingSession<S>, SessionError> {
        let user = ctx.user().ok_or(SessionError::NotSignedIn)?;
        let site_id = user.id.clone();

        let draft = match self.store.fetch(&site_id).await {
            Ok(site) => site.materialized(),
            Err(StoreError::NotFound(_)) => default_content(),
            Err(e) => return Err(e.into()),
        };

        self.state
            .lock()
            .unwrap()
            .update_site(&site_id, draft.clone());
        info!("opened editing session for site {}", site_id);

        Ok(EditingSession {
            site_id,
            store: self.store.clone(),
            events: self.events.clone(),
            cache: self.state.clone(),
            draft,
        })
    }
}

/// One tenant's editing session: local draft plus the save discipline.
pub struct EditingSession<S> {
    site_id: String,
    store: Arc<S>,
    events: SiteEvents,
    cache: Arc<Mutex<WorkspaceState>>,
    draft: Value,
}

impl<S: DocumentStore> EditingSession<S> {
    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    /// The materialized draft document (local, possibly unsaved).
    pub fn draft(&self) -> &Value {
        &self.draft
    }

    /// Typed view of the draft for UI code.
    pub fn draft_content(&self) -> WebsiteContent {
        WebsiteContent::from_value(&self.draft)
    }

    /// Save one field: optimistic draft update, then merge into the
    /// freshly fetched remote document and persist.
    ///
    /// On failure the draft keeps the user's value; nothing is silently
    /// dropped and no partial write happens.
    pub async fn save_field(&mut self, path: &FieldPath, value: Value) -> Result<(), SessionError> {
        self.draft = set_path(&self.draft, path, value.clone());

        let remote = self.fetch_remote_for_save(path).await?;
        let merged = set_path(&remote, path, value);
        let written = self.persist(path, merged).await?;

        self.finish_save(path, written);
        Ok(())
    }

    /// Apply an ordered-list operation with the same save discipline.
    ///
    /// Invalid operations are rejected synchronously against the draft
    /// snapshot, before any network activity.
    pub async fn save_array(&mut self, path: &FieldPath, op: &ArrayOp) -> Result<(), SessionError> {
        self.draft = mutate_array(&self.draft, path, op)?;

        let remote = self.fetch_remote_for_save(path).await?;
        let merged = mutate_array(&remote, path, op).map_err(|e| {
            warn!("array op on {} no longer applies remotely: {}", path, e);
            e
        })?;
        let written = self.persist(path, merged).await?;

        self.finish_save(path, written);
        Ok(())
    }

    /// Drive a widget through `Editing -> Saving -> Viewing`.
    ///
    /// A failed save returns the widget to `Editing` with its buffer
    /// intact. A widget that is not editing is a no-op.
    pub async fn save_edit(&mut self, editor: &mut FieldEditor) -> Result<(), SessionError> {
        let Some(buffer) = editor.begin_save() else {
            return Ok(());
        };
        let path = editor.path().clone();

        match self.save_field(&path, buffer.clone()).await {
            Ok(()) => {
                editor.complete_save(buffer);
                Ok(())
            }
            Err(e) => {
                editor.fail_save(buffer);
                Err(e)
            }
        }
    }

    /// Upload a hero image and write its URL at `theme.topImage`.
    pub async fn set_top_image<U: ObjectStore>(
        &mut self,
        uploads: &U,
        bytes: &[u8],
        suggested_name: &str,
    ) -> Result<String, SessionError> {
        let url = uploads.upload(bytes, suggested_name).await?;
        self.save_field(
            &FieldPath::of("theme", &["topImage"]),
            Value::String(url.clone()),
        )
        .await?;
        Ok(url)
    }

    /// Discard the draft and re-seed it from the store.
    pub async fn refresh(&mut self) -> Result<(), SessionError> {
        self.draft = match self.store.fetch(&self.site_id).await {
            Ok(site) => site.materialized(),
            Err(StoreError::NotFound(_)) => default_content(),
            Err(e) => return Err(e.into()),
        };

        self.cache
            .lock()
            .unwrap()
            .update_site(&self.site_id, self.draft.clone());
        self.events.emit(SiteEvent::refreshed(&self.site_id));
        Ok(())
    }

    // Reads go through read-repair, so the merge base always carries every
    // canonical key and the written document is gradually repaired too.
    async fn fetch_remote_for_save(&self, path: &FieldPath) -> Result<Value, SessionError> {
        match self.store.fetch(&self.site_id).await {
            Ok(site) => Ok(site.materialized()),
            // First save of a brand-new site merges into the defaults
            Err(StoreError::NotFound(_)) => Ok(default_content()),
            Err(e) => {
                warn!("fetch before saving {} failed: {}", path, e);
                Err(e.into())
            }
        }
    }

    async fn persist(&self, path: &FieldPath, merged: Value) -> Result<Value, SessionError> {
        match self.store.write(&self.site_id, merged).await {
            Ok(site) => Ok(site.content),
            Err(e) => {
                warn!("write of {} for site {} failed: {}", path, self.site_id, e);
                Err(e.into())
            }
        }
    }

    fn finish_save(&mut self, path: &FieldPath, stored: Value) {
        self.draft = materialize(&stored);
        let version = self
            .cache
            .lock()
            .unwrap()
            .update_site(&self.site_id, self.draft.clone());
        debug!("saved {} for site {} (cache v{})", path, self.site_id, version);
        self.events
            .emit(SiteEvent::content_saved(&self.site_id, &path.to_string()));
    }
}
