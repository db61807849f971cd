//! Change notifications for open views.
//!
//! Every successful save, publish, and refresh emits a [`SiteEvent`] on a
//! broadcast channel so other open views of the same site can refetch.
//! Delivery is lossy and best-effort: a lagging receiver misses events,
//! and no receiver at all is fine.

use serde::Serialize;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SiteEvent {
    /// A content field was saved
    ContentSaved {
        site_id: String,
        path: String,
        timestamp: i64,
    },

    /// The published flag changed (or was re-stamped)
    Published {
        site_id: String,
        published: bool,
        timestamp: i64,
    },

    /// A session re-seeded its draft from the store
    Refreshed { site_id: String, timestamp: i64 },
}

impl SiteEvent {
    pub(crate) fn content_saved(site_id: &str, path: &str) -> Self {
        SiteEvent::ContentSaved {
            site_id: site_id.to_string(),
            path: path.to_string(),
            timestamp: now_millis(),
        }
    }

    pub(crate) fn published(site_id: &str, published: bool) -> Self {
        SiteEvent::Published {
            site_id: site_id.to_string(),
            published,
            timestamp: now_millis(),
        }
    }

    pub(crate) fn refreshed(site_id: &str) -> Self {
        SiteEvent::Refreshed {
            site_id: site_id.to_string(),
            timestamp: now_millis(),
        }
    }

    pub fn site_id(&self) -> &str {
        match self {
            SiteEvent::ContentSaved { site_id, .. } => site_id,
            SiteEvent::Published { site_id, .. } => site_id,
            SiteEvent::Refreshed { site_id, .. } => site_id,
        }
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Broadcast hub for [`SiteEvent`]s.
#[derive(Debug, Clone)]
pub struct SiteEvents {
    sender: broadcast::Sender<SiteEvent>,
}

impl SiteEvents {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SiteEvent> {
        self.sender.subscribe()
    }

    /// Subscribe as a `Stream` (for SSE-style fan-out to views).
    pub fn stream(&self) -> BroadcastStream<SiteEvent> {
        BroadcastStream::new(self.sender.subscribe())
    }

    pub(crate) fn emit(&self, event: SiteEvent) {
        // A send error just means nobody is listening right now.
        let _ = self.sender.send(event);
    }
}

impl Default for SiteEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_see_events() {
        let events = SiteEvents::new();
        let mut rx = events.subscribe();

        events.emit(SiteEvent::content_saved("tenant-1", "businessName"));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.site_id(), "tenant-1");
        match event {
            SiteEvent::ContentSaved { path, .. } => assert_eq!(path, "businessName"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_stream_subscription() {
        use tokio_stream::StreamExt;

        let events = SiteEvents::new();
        let mut stream = events.stream();

        events.emit(SiteEvent::refreshed("tenant-1"));

        let event = stream.next().await.unwrap().unwrap();
        assert_eq!(event.site_id(), "tenant-1");
    }

    #[tokio::test]
    async fn test_emit_without_subscribers_is_fine() {
        let events = SiteEvents::new();
        events.emit(SiteEvent::refreshed("tenant-1"));
    }

    #[test]
    fn test_event_serializes_for_the_wire() {
        let event = SiteEvent::published("tenant-1", true);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "published");
        assert_eq!(json["site_id"], "tenant-1");
    }
}
