//! Discussions page
//!
//! Reactions, votes and comments only live in this page's store. Actions
//! that target a missing or mismatched discussion are logged and dropped,
//! leaving the page as it was.

use portal_core::discussions::{
    current_user_reaction, poll_tally, reaction_count_for, selected_option, PollTally,
};
use portal_core::filter::{apply, DiscussionFilter};
use portal_core::{
    Discussion, DiscussionStore, NewDiscussionForm, PermissionMatrix, PortalAction, User,
    REACTION_PALETTE,
};
use tracing::{info, warn};

use super::PageError;

#[derive(Debug)]
pub struct DiscussionsPage {
    store: DiscussionStore,
    user: User,
    pub filter: DiscussionFilter,
}

/// One palette entry as shown under a discussion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionSummary {
    pub symbol: &'static str,
    pub count: usize,
    pub mine: bool,
}

impl DiscussionsPage {
    pub fn mount(user: User) -> Self {
        Self {
            store: DiscussionStore::with_seed_data(),
            user,
            filter: DiscussionFilter::default(),
        }
    }

    pub fn discussions(&self) -> &[Discussion] {
        self.store.discussions()
    }

    pub fn visible(&self) -> Vec<&Discussion> {
        apply(self.store.discussions(), &self.filter)
    }

    pub fn discussion(&self, id: &str) -> Option<&Discussion> {
        self.store.get(id)
    }

    pub fn can_create(&self) -> bool {
        PermissionMatrix::can_perform(&self.user, PortalAction::CreateDiscussion)
    }

    pub fn create(&mut self, form: &NewDiscussionForm) -> Result<&Discussion, PageError> {
        if !self.can_create() {
            return Err(PageError::Forbidden("start discussions"));
        }
        let draft = form.validate(&self.user.name, &self.user.role)?;
        let discussion = self.store.add_discussion(draft)?;
        info!(id = %discussion.id, "Discussion started");
        Ok(discussion)
    }

    pub fn react(&mut self, discussion_id: &str, symbol: &str) {
        if let Err(e) = self.store.set_reaction(discussion_id, &self.user.id, symbol) {
            warn!(discussion_id, error = %e, "Reaction ignored");
        }
    }

    pub fn vote(&mut self, discussion_id: &str, option: &str) {
        if let Err(e) = self.store.set_poll_response(discussion_id, &self.user.id, option) {
            warn!(discussion_id, error = %e, "Vote ignored");
        }
    }

    pub fn comment(&mut self, discussion_id: &str, message: &str) {
        if let Err(e) = self.store.add_comment(discussion_id, &self.user.name, message) {
            warn!(discussion_id, error = %e, "Comment ignored");
        }
    }

    /// Palette counts with the current user's pick marked
    pub fn reactions(&self, discussion: &Discussion) -> Vec<ReactionSummary> {
        let mine = current_user_reaction(discussion, &self.user.id);
        REACTION_PALETTE
            .iter()
            .map(|symbol| ReactionSummary {
                symbol,
                count: reaction_count_for(discussion, symbol),
                mine: mine == Some(*symbol),
            })
            .collect()
    }

    pub fn tally(&self, discussion: &Discussion) -> Option<PollTally> {
        poll_tally(discussion)
    }

    pub fn my_vote<'a>(&self, discussion: &'a Discussion) -> Option<&'a str> {
        selected_option(discussion, &self.user.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::DiscussionType;

    #[test]
    fn test_actions_on_missing_targets_are_ignored() {
        let mut page = DiscussionsPage::mount(User::default());
        let before = page.discussions().to_vec();

        page.react("404", "👍");
        page.vote("1", "Full Remote");
        page.vote("2", "Not an option");
        page.comment("404", "hello");
        page.comment("1", "   ");

        assert_eq!(page.discussions(), before.as_slice());
    }

    #[test]
    fn test_vote_and_reaction_markers() {
        let mut page = DiscussionsPage::mount(User::default());
        page.vote("2", "Full Remote");
        page.react("2", "🎉");
        page.react("2", "❤️");

        let d = page.discussion("2").unwrap();
        assert_eq!(page.my_vote(d), Some("Full Remote"));
        let tally = page.tally(d).unwrap();
        assert_eq!(tally.total_responses, 5);
        assert_eq!(tally.for_option("Full Remote").unwrap().count, 2);

        let summary = page.reactions(d);
        let heart = summary.iter().find(|r| r.symbol == "❤️").unwrap();
        assert!(heart.mine);
        assert_eq!(heart.count, 1);
        assert_eq!(summary.iter().find(|r| r.symbol == "🎉").unwrap().count, 0);
    }

    #[test]
    fn test_create_and_filter() {
        let mut page = DiscussionsPage::mount(User::default());
        let form = NewDiscussionForm {
            title: "Lunch venue".into(),
            content: "Where should we go?".into(),
            discussion_type: DiscussionType::Poll,
            options: vec!["Pizza".into(), " ".into(), "Sushi".into()],
        };
        let id = page.create(&form).unwrap().id.clone();
        assert_eq!(page.discussions()[0].id, id);
        assert_eq!(page.discussions()[0].poll().unwrap().options.len(), 2);

        page.filter.discussion_type = Some(DiscussionType::Poll);
        page.filter.search = "lunch".into();
        let visible = page.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].created_by, "John Doe");
    }

    #[test]
    fn test_regular_employee_cannot_create() {
        let mut page = DiscussionsPage::mount(User {
            role: "employee".into(),
            ..User::default()
        });
        let form = NewDiscussionForm {
            title: "Hi".into(),
            content: "There".into(),
            ..Default::default()
        };
        assert!(matches!(page.create(&form), Err(PageError::Forbidden(_))));
    }
}
