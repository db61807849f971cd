//! Site publication.
//!
//! Publication is a coarse flag flip on the website entity, independent of
//! content editing. It is idempotent state-wise, but every call records a
//! fresh `published_at` stamp.

use tracing::info;

use sitewright_common::{DocumentStore, StoreError};
use sitewright_content::Website;

use crate::context::SessionContext;
use crate::events::SiteEvent;
use crate::session::{SessionError, Workspace};

impl<S: DocumentStore> Workspace<S> {
    pub async fn publish(&self, ctx: &SessionContext) -> Result<Website, SessionError> {
        self.flip_published(ctx, true).await
    }

    pub async fn unpublish(&self, ctx: &SessionContext) -> Result<Website, SessionError> {
        self.flip_published(ctx, false).await
    }

    async fn flip_published(
        &self,
        ctx: &SessionContext,
        published: bool,
    ) -> Result<Website, SessionError> {
        let user = ctx.user().ok_or(SessionError::NotSignedIn)?;

        let site = self.store().set_published(&user.id, published).await?;
        info!("site {} published={}", site.id, published);
        self.events().emit(SiteEvent::published(&site.id, published));
        Ok(site)
    }

    /// Public lookup by subdomain slug. Only published sites resolve.
    pub async fn public_site(&self, path: &str) -> Result<Website, SessionError> {
        let site = self.store().find_by_path(path).await?;
        if !site.published {
            return Err(SessionError::Store(StoreError::NotFound(path.to_string())));
        }
        Ok(site)
    }
}
