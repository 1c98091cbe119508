//! Feedback page

use portal_core::filter::{apply, FeedbackFilter};
use portal_core::{can_modify_feedback, validate_feedback_content, Feedback, NewFeedback, User};
use portal_net::{ApiClient, CancelHandle};
use tracing::info;

use super::{LoadState, Listing, PageError};

#[derive(Debug)]
pub struct FeedbackPage {
    listing: Listing<Feedback>,
    pub filter: FeedbackFilter,
}

impl Default for FeedbackPage {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackPage {
    pub fn new() -> Self {
        Self {
            listing: Listing::new("feedback"),
            filter: FeedbackFilter::default(),
        }
    }

    /// Handle that cancels an in-flight [`FeedbackPage::load`]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.listing.cancel_handle()
    }

    pub async fn load(&mut self, api: &ApiClient) {
        self.listing.load(api.feedback()).await;
    }

    pub fn state(&self) -> &LoadState {
        self.listing.state()
    }

    pub fn entries(&self) -> &[Feedback] {
        self.listing.items()
    }

    pub fn visible(&self) -> Vec<&Feedback> {
        apply(self.listing.items(), &self.filter)
    }

    /// Submit feedback as `user` and put the server's copy at the top
    pub async fn submit(&mut self, api: &ApiClient, user: &User, content: &str) -> Result<&Feedback, PageError> {
        let content = validate_feedback_content(content)?;
        let draft = NewFeedback {
            content,
            user_id: user.name.clone(),
        };
        let created = api.create_feedback(&draft).await?;
        info!(id = %created.id, "Feedback submitted");

        let list = self.listing.list_mut();
        list.prepend(created);
        Ok(&list.items()[0])
    }

    /// Rewrite an entry locally; only its author or an admin may
    pub fn edit(&mut self, user: &User, id: &str, content: &str) -> Result<(), PageError> {
        self.check_owner(user, id)?;
        let content = validate_feedback_content(content)?;
        self.listing.list_mut().update(id, |f| f.content = content);
        Ok(())
    }

    /// Remove an entry locally; only its author or an admin may
    pub fn delete(&mut self, user: &User, id: &str) -> Result<Feedback, PageError> {
        self.check_owner(user, id)?;
        self.listing
            .list_mut()
            .remove(id)
            .ok_or_else(|| PageError::Missing("feedback", id.to_string()))
    }

    fn check_owner(&self, user: &User, id: &str) -> Result<(), PageError> {
        let entry = self
            .listing
            .items()
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| PageError::Missing("feedback", id.to_string()))?;
        if can_modify_feedback(user, entry) {
            Ok(())
        } else {
            Err(PageError::Forbidden("modify this feedback"))
        }
    }

}
