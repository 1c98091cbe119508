//! In-memory discussion store
//!
//! Holds the discussions page's collection and applies reactions, poll
//! votes and comments. Nothing here is sent to the server; the collection
//! lives as long as the page that owns it.

mod seed;
mod tally;

use chrono::{Local, Utc};
use tracing::debug;

use crate::error::{Error, FieldErrors, Result};
use crate::invariants::assert_discussion_invariants;
use crate::models::{Comment, Discussion, DiscussionDraft, DiscussionKind, Reaction};

pub use seed::seed_discussions;
pub use tally::{
    current_user_reaction, poll_tally, reaction_count_for, selected_option, OptionTally, PollTally,
};

/// Ordered discussion collection, most recent first
#[derive(Debug, Clone, Default)]
pub struct DiscussionStore {
    discussions: Vec<Discussion>,
}

impl DiscussionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the page's starter discussions
    pub fn with_seed_data() -> Self {
        Self {
            discussions: seed_discussions(),
        }
    }

    pub fn discussions(&self) -> &[Discussion] {
        &self.discussions
    }

    pub fn get(&self, discussion_id: &str) -> Option<&Discussion> {
        self.discussions.iter().find(|d| d.id == discussion_id)
    }

    pub fn len(&self) -> usize {
        self.discussions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discussions.is_empty()
    }

    /// Create a discussion from a draft and put it at the top
    pub fn add_discussion(&mut self, draft: DiscussionDraft) -> Result<&Discussion> {
        if let DiscussionKind::Poll(poll) = &draft.kind {
            if poll.options.len() < 2 {
                let mut errors = FieldErrors::new();
                errors.add("options", "At least 2 poll options are required");
                return Err(Error::Validation(errors));
            }
        }

        let id = self.next_id();
        let created_at = Local::now().date_naive();
        let discussion = Discussion::from_draft(id, created_at, draft);
        assert_discussion_invariants(&discussion);

        debug!(id = %discussion.id, kind = %discussion.discussion_type(), "Discussion added");
        self.discussions.insert(0, discussion);
        Ok(&self.discussions[0])
    }

    /// Set `employee_id`'s reaction, replacing any earlier one in place
    pub fn set_reaction(&mut self, discussion_id: &str, employee_id: &str, symbol: &str) -> Result<()> {
        let discussion = self.find_mut(discussion_id)?;
        let reactions = discussion.reactions_mut();

        match reactions.iter_mut().find(|r| r.employee_id == employee_id) {
            Some(existing) => existing.reaction = symbol.to_string(),
            None => reactions.push(Reaction {
                employee_id: employee_id.to_string(),
                reaction: symbol.to_string(),
            }),
        }

        assert_discussion_invariants(discussion);
        Ok(())
    }

    /// Record `employee_id`'s vote, overwriting a previous one
    pub fn set_poll_response(&mut self, discussion_id: &str, employee_id: &str, option: &str) -> Result<()> {
        let discussion = self.find_mut(discussion_id)?;
        let poll = discussion.poll_mut().ok_or_else(|| {
            Error::InvalidOperation(format!("discussion {discussion_id} is not a poll"))
        })?;

        if !poll.has_option(option) {
            return Err(Error::InvalidOperation(format!(
                "poll {discussion_id} has no option {option:?}"
            )));
        }

        poll.poll_responses
            .insert(employee_id.to_string(), option.to_string());
        Ok(())
    }

    /// Append a comment stamped with the current time
    pub fn add_comment(&mut self, discussion_id: &str, employee_id: &str, message: &str) -> Result<&Comment> {
        let message = message.trim();
        if message.is_empty() {
            let mut errors = FieldErrors::new();
            errors.add("message", "Comment cannot be empty");
            return Err(Error::Validation(errors));
        }

        let discussion = self.find_mut(discussion_id)?;
        discussion.push_comment(Comment {
            employee_id: employee_id.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        });

        let comments = discussion.comments();
        Ok(&comments[comments.len() - 1])
    }

    fn find_mut(&mut self, discussion_id: &str) -> Result<&mut Discussion> {
        self.discussions
            .iter_mut()
            .find(|d| d.id == discussion_id)
            .ok_or_else(|| Error::NotFound(format!("discussion {discussion_id}")))
    }

    /// Millisecond timestamp id, bumped past any id already taken
    fn next_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiscussionType, NewDiscussionForm, Poll};

    fn forum_draft(title: &str) -> DiscussionDraft {
        DiscussionDraft {
            title: title.to_string(),
            content: "Body".to_string(),
            created_by: "John Doe".to_string(),
            role: "admin".to_string(),
            kind: DiscussionKind::Forum,
        }
    }

    fn poll_draft() -> DiscussionDraft {
        DiscussionDraft {
            kind: DiscussionKind::Poll(Poll::new(vec!["A".into(), "B".into()])),
            ..forum_draft("Vote")
        }
    }

    #[test]
    fn test_add_discussion_prepends() {
        let mut store = DiscussionStore::with_seed_data();
        let before = store.len();

        let id = store.add_discussion(forum_draft("Fresh topic")).unwrap().id.clone();

        assert_eq!(store.len(), before + 1);
        let first = &store.discussions()[0];
        assert_eq!(first.id, id);
        assert_eq!(first.title, "Fresh topic");
        assert!(first.reactions().is_empty());
        assert!(first.comments().is_empty());
        assert_eq!(first.created_at, Local::now().date_naive());
    }

    #[test]
    fn test_one_option_poll_is_rejected() {
        let mut store = DiscussionStore::new();
        let draft = DiscussionDraft {
            kind: DiscussionKind::Poll(Poll::new(vec!["only".into()])),
            ..forum_draft("Lonely poll")
        };

        match store.add_discussion(draft) {
            Err(Error::Validation(fields)) => assert_eq!(
                fields.get("options"),
                Some("At least 2 poll options are required")
            ),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_stay_unique_within_one_millisecond() {
        let mut store = DiscussionStore::new();
        for i in 0..20 {
            store.add_discussion(forum_draft(&format!("t{i}"))).unwrap();
        }
        let mut ids: Vec<_> = store.discussions().iter().map(|d| d.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_new_poll_starts_with_no_responses() {
        let mut store = DiscussionStore::new();
        let form = NewDiscussionForm {
            title: "Lunch".into(),
            content: "Where?".into(),
            discussion_type: DiscussionType::Poll,
            options: vec!["Pizza".into(), "Tacos".into()],
        };
        let draft = form.validate("John Doe", "admin").unwrap();
        let poll = store.add_discussion(draft).unwrap().poll().cloned().unwrap();
        assert_eq!(poll.options.len(), 2);
        assert_eq!(poll.total_responses(), 0);
    }

    #[test]
    fn test_reaction_last_write_wins() {
        let mut store = DiscussionStore::with_seed_data();
        store.set_reaction("1", "1", "👍").unwrap();
        store.set_reaction("1", "1", "🎉").unwrap();

        let d = store.get("1").unwrap();
        assert_eq!(current_user_reaction(d, "1"), Some("🎉"));
        assert_eq!(d.reactions().iter().filter(|r| r.employee_id == "1").count(), 1);
    }

    #[test]
    fn test_reaction_replaced_in_place() {
        let mut store = DiscussionStore::with_seed_data();
        // mike_chen is the second reactor on the first seed discussion
        store.set_reaction("1", "mike_chen", "😊").unwrap();
        let d = store.get("1").unwrap();
        assert_eq!(d.reactions().len(), 3);
        assert_eq!(d.reactions()[1].employee_id, "mike_chen");
        assert_eq!(d.reactions()[1].reaction, "😊");
    }

    #[test]
    fn test_reaction_on_unknown_discussion() {
        let mut store = DiscussionStore::with_seed_data();
        let snapshot = store.discussions().to_vec();
        let err = store.set_reaction("missing", "1", "👍").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(store.discussions(), snapshot.as_slice());
    }

    #[test]
    fn test_poll_response_overwrites() {
        let mut store = DiscussionStore::new();
        let id = store.add_discussion(poll_draft()).unwrap().id.clone();

        store.set_poll_response(&id, "1", "A").unwrap();
        store.set_poll_response(&id, "1", "B").unwrap();

        let d = store.get(&id).unwrap();
        let poll = d.poll().unwrap();
        assert_eq!(poll.total_responses(), 1);
        assert_eq!(selected_option(d, "1"), Some("B"));
    }

    #[test]
    fn test_poll_response_rejected_for_forum() {
        let mut store = DiscussionStore::with_seed_data();
        let err = store.set_poll_response("1", "1", "Full Remote").unwrap_err();
        assert!(matches!(err, Error::InvalidOperation(_)));
        assert!(store.get("1").unwrap().poll().is_none());
    }

    #[test]
    fn test_poll_response_rejects_unknown_option() {
        let mut store = DiscussionStore::with_seed_data();
        let err = store.set_poll_response("2", "1", "Four-day week").unwrap_err();
        assert!(matches!(err, Error::InvalidOperation(_)));
        assert_eq!(store.get("2").unwrap().poll().unwrap().total_responses(), 4);
    }

    #[test]
    fn test_comment_scenario() {
        let mut store = DiscussionStore::with_seed_data();
        let d = store
            .discussions()
            .iter()
            .find(|d| d.title == "Q1 Company Goals Discussion")
            .unwrap();
        assert_eq!(d.discussion_type(), DiscussionType::Forum);
        let id = d.id.clone();
        let before = d.comments().len();

        let started = Utc::now();
        store.add_comment(&id, "John Doe", "Agreed").unwrap();
        let finished = Utc::now();

        let comments = store.get(&id).unwrap().comments();
        assert_eq!(comments.len(), before + 1);
        let last = comments.last().unwrap();
        assert_eq!(last.employee_id, "John Doe");
        assert_eq!(last.message, "Agreed");
        assert!(last.timestamp >= started && last.timestamp <= finished);
    }

    #[test]
    fn test_comments_keep_call_order() {
        let mut store = DiscussionStore::new();
        let id = store.add_discussion(forum_draft("Order")).unwrap().id.clone();
        let messages = ["first", "second", "third", "fourth"];
        for m in messages {
            store.add_comment(&id, "John Doe", m).unwrap();
        }
        let stored: Vec<_> = store
            .get(&id)
            .unwrap()
            .comments()
            .iter()
            .map(|c| c.message.as_str())
            .collect();
        assert_eq!(stored, messages);
    }

    #[test]
    fn test_blank_comment_rejected() {
        let mut store = DiscussionStore::with_seed_data();
        let err = store.add_comment("1", "John Doe", "   \n").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(store.get("1").unwrap().comments().len(), 2);
    }

    #[test]
    fn test_comment_on_unknown_discussion() {
        let mut store = DiscussionStore::new();
        assert!(matches!(
            store.add_comment("nope", "John Doe", "hello"),
            Err(Error::NotFound(_))
        ));
    }
}
