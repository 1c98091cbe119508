//! Dashboard: the latest announcements

use portal_core::Announcement;
use portal_net::{ApiClient, CancelHandle};

use super::{LoadState, Listing};

/// Announcements shown on the dashboard feed
pub const FEED_LENGTH: usize = 5;

#[derive(Debug)]
pub struct DashboardPage {
    announcements: Listing<Announcement>,
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardPage {
    pub fn new() -> Self {
        Self {
            announcements: Listing::new("announcements"),
        }
    }

    /// Handle that cancels an in-flight [`DashboardPage::load`]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.announcements.cancel_handle()
    }

    pub async fn load(&mut self, api: &ApiClient) {
        self.announcements.load(api.announcements()).await;
    }

    pub fn state(&self) -> &LoadState {
        self.announcements.state()
    }

    /// Newest first, as served
    pub fn feed(&self) -> &[Announcement] {
        let items = self.announcements.items();
        &items[..items.len().min(FEED_LENGTH)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewmodel::test_support::api_for;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    #[tokio::test]
    async fn test_feed_is_capped() {
        let items: Vec<_> = (1..=8)
            .map(|i| json!({"id": i, "title": format!("News {i}"), "priority": "low"}))
            .collect();
        let app = Router::new().route(
            "/api/announcements",
            get(move || {
                let items = items.clone();
                async move { Json(json!(items)) }
            }),
        );
        let mut page = DashboardPage::new();
        page.load(&api_for(app).await).await;
        assert_eq!(page.state(), &LoadState::Ready);
        assert_eq!(page.feed().len(), FEED_LENGTH);
        assert_eq!(page.feed()[0].title, "News 1");
    }

    #[tokio::test]
    async fn test_failed_feed_has_error_state() {
        let app = Router::new().route(
            "/api/announcements",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let mut page = DashboardPage::new();
        page.load(&api_for(app).await).await;
        assert_eq!(
            page.state(),
            &LoadState::Failed("Failed to fetch announcements: 503 Service Unavailable".into())
        );
        assert!(page.feed().is_empty());
    }
}
