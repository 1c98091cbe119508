//! Announcements page

use portal_core::filter::{apply, AnnouncementFilter};
use portal_core::{Announcement, NewAnnouncement, PermissionMatrix, PortalAction, User};
use portal_net::{ApiClient, CancelHandle};
use tracing::info;

use super::{LoadState, Listing, PageError};

#[derive(Debug)]
pub struct AnnouncementsPage {
    listing: Listing<Announcement>,
    pub filter: AnnouncementFilter,
}

impl Default for AnnouncementsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnouncementsPage {
    pub fn new() -> Self {
        Self {
            listing: Listing::new("announcements"),
            filter: AnnouncementFilter::default(),
        }
    }

    /// Handle that cancels an in-flight [`AnnouncementsPage::load`]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.listing.cancel_handle()
    }

    pub async fn load(&mut self, api: &ApiClient) {
        self.listing.load(api.announcements()).await;
    }

    pub fn state(&self) -> &LoadState {
        self.listing.state()
    }

    pub fn announcements(&self) -> &[Announcement] {
        self.listing.items()
    }

    pub fn visible(&self) -> Vec<&Announcement> {
        apply(self.listing.items(), &self.filter)
    }

    pub fn can_create(user: &User) -> bool {
        PermissionMatrix::can_perform(user, PortalAction::CreateAnnouncement)
    }

    /// Publish, then reload the whole list from the server
    pub async fn create(
        &mut self,
        api: &ApiClient,
        user: &User,
        draft: NewAnnouncement,
    ) -> Result<(), PageError> {
        if !Self::can_create(user) {
            return Err(PageError::Forbidden("publish announcements"));
        }
        let draft = draft.validate()?;
        api.create_announcement(&draft).await?;
        info!(title = %draft.title, "Announcement published");
        self.listing.refresh(api.announcements()).await
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewmodel::test_support::api_for;
    use axum::routing::get;
    use axum::{Json, Router};
    use portal_core::Priority;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    fn draft() -> NewAnnouncement {
        NewAnnouncement {
            title: "  Office closed Friday ".into(),
            priority: Priority::High,
            category: "Facilities".into(),
            author: "John Doe".into(),
            department: "Information Technology".into(),
            date: "2024-03-01".into(),
            description: "Maintenance work".into(),
        }
    }

    fn server(store: Arc<Mutex<Vec<Value>>>) -> Router {
        let read = store.clone();
        Router::new().route(
            "/api/announcements",
            get(move || {
                let read = read.clone();
                async move { Json(Value::Array(read.lock().unwrap().clone())) }
            })
            .post(move |Json(body): Json<Value>| {
                let store = store.clone();
                async move {
                    let mut items = store.lock().unwrap();
                    let mut record = body.clone();
                    record["id"] = json!(items.len() + 1);
                    items.insert(0, record);
                    Json(json!({"ok": true}))
                }
            }),
        )
    }

    #[tokio::test]
    async fn test_create_refetches_list() {
        let store = Arc::new(Mutex::new(vec![json!({
            "id": "a1", "title": "Welcome", "priority": "low", "author": "HR Team"
        })]));
        let api = api_for(server(store)).await;
        let mut page = AnnouncementsPage::new();
        page.load(&api).await;
        assert_eq!(page.announcements().len(), 1);

        page.create(&api, &User::default(), draft()).await.unwrap();
        assert_eq!(page.announcements().len(), 2);
        assert_eq!(page.announcements()[0].title, "Office closed Friday");
        assert_eq!(page.announcements()[0].priority, Priority::High);

        page.filter.priority = Some(Priority::Low);
        let visible = page.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].author, "HR Team");
    }

    #[tokio::test]
    async fn test_create_requires_role_and_fields() {
        let store = Arc::new(Mutex::new(Vec::new()));
        let api = api_for(server(store.clone())).await;
        let mut page = AnnouncementsPage::new();
        page.load(&api).await;

        let mut employee = User::default();
        employee.role = "employee".into();
        let err = page.create(&api, &employee, draft()).await.unwrap_err();
        assert!(matches!(err, PageError::Forbidden(_)));

        let mut blank = draft();
        blank.title = " ".into();
        let err = page.create(&api, &User::default(), blank).await.unwrap_err();
        assert!(matches!(err, PageError::Core(portal_core::Error::Validation(_))));
        assert!(store.lock().unwrap().is_empty());
    }
}
