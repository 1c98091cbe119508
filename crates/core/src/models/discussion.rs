//! Discussion model: forum threads, polls and announcements with
//! reactions and comments attached

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, FieldErrors, Result};

/// Symbols offered by the reaction bar, in display order
pub const REACTION_PALETTE: [&str; 4] = ["👍", "❤️", "😊", "🎉"];

/// Discussion categories, used for display and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscussionType {
    Poll,
    Forum,
    Announcement,
}

impl DiscussionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscussionType::Poll => "poll",
            DiscussionType::Forum => "forum",
            DiscussionType::Announcement => "announcement",
        }
    }

    pub fn all() -> &'static [DiscussionType] {
        &[
            DiscussionType::Forum,
            DiscussionType::Poll,
            DiscussionType::Announcement,
        ]
    }
}

impl fmt::Display for DiscussionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscussionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "poll" => Ok(DiscussionType::Poll),
            "forum" => Ok(DiscussionType::Forum),
            "announcement" => Ok(DiscussionType::Announcement),
            other => Err(Error::InvalidOperation(format!(
                "unknown discussion type: {other}"
            ))),
        }
    }
}

/// One user's reaction to a discussion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub employee_id: String,
    pub reaction: String,
}

/// A comment on a discussion. Comments are never edited or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Author display name
    pub employee_id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Poll payload: the choices and who picked what
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub options: Vec<String>,
    /// employee id -> chosen option
    #[serde(default)]
    pub poll_responses: BTreeMap<String, String>,
}

impl Poll {
    pub fn new(options: Vec<String>) -> Self {
        Self {
            options,
            poll_responses: BTreeMap::new(),
        }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    pub fn total_responses(&self) -> usize {
        self.poll_responses.len()
    }
}

/// Type-specific payload. Only polls carry options and responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DiscussionKind {
    Poll(Poll),
    Forum,
    Announcement,
}

impl DiscussionKind {
    pub fn discussion_type(&self) -> DiscussionType {
        match self {
            DiscussionKind::Poll(_) => DiscussionType::Poll,
            DiscussionKind::Forum => DiscussionType::Forum,
            DiscussionKind::Announcement => DiscussionType::Announcement,
        }
    }
}

/// A discussion thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_by: String,
    pub role: String,
    #[serde(flatten)]
    kind: DiscussionKind,
    pub created_at: NaiveDate,
    reactions: Vec<Reaction>,
    comments: Vec<Comment>,
}

impl Discussion {
    /// Build a discussion from a validated draft
    pub fn from_draft(id: String, created_at: NaiveDate, draft: DiscussionDraft) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
            created_by: draft.created_by,
            role: draft.role,
            kind: draft.kind,
            created_at,
            reactions: Vec::new(),
            comments: Vec::new(),
        }
    }

    pub fn kind(&self) -> &DiscussionKind {
        &self.kind
    }

    pub fn discussion_type(&self) -> DiscussionType {
        self.kind.discussion_type()
    }

    pub fn poll(&self) -> Option<&Poll> {
        match &self.kind {
            DiscussionKind::Poll(poll) => Some(poll),
            _ => None,
        }
    }

    pub(crate) fn poll_mut(&mut self) -> Option<&mut Poll> {
        match &mut self.kind {
            DiscussionKind::Poll(poll) => Some(poll),
            _ => None,
        }
    }

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub(crate) fn reactions_mut(&mut self) -> &mut Vec<Reaction> {
        &mut self.reactions
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub(crate) fn push_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Seed constructor with pre-existing activity
    pub(crate) fn seeded(
        base: Discussion,
        reactions: Vec<Reaction>,
        comments: Vec<Comment>,
    ) -> Self {
        Self {
            reactions,
            comments,
            ..base
        }
    }
}

/// Fields supplied by the creator; the store assigns the rest.
/// Built by [`NewDiscussionForm::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionDraft {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) created_by: String,
    pub(crate) role: String,
    pub(crate) kind: DiscussionKind,
}

/// Raw input of the "new discussion" form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDiscussionForm {
    pub title: String,
    pub content: String,
    pub discussion_type: DiscussionType,
    /// Poll choices as typed; blank ones are dropped, the rest kept verbatim
    pub options: Vec<String>,
}

impl Default for NewDiscussionForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            discussion_type: DiscussionType::Forum,
            options: vec![String::new(), String::new()],
        }
    }
}

impl NewDiscussionForm {
    /// Validate and turn the form into a draft authored by `author`/`role`
    pub fn validate(&self, author: &str, role: &str) -> Result<DiscussionDraft> {
        let mut errors = FieldErrors::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.add("title", "Title is required");
        }
        let content = self.content.trim();
        if content.is_empty() {
            errors.add("content", "Content is required");
        }

        let kind = match self.discussion_type {
            DiscussionType::Poll => {
                let options: Vec<String> = self
                    .options
                    .iter()
                    .filter(|o| !o.trim().is_empty())
                    .cloned()
                    .collect();
                if options.len() < 2 {
                    errors.add("options", "At least 2 poll options are required");
                }
                DiscussionKind::Poll(Poll::new(options))
            }
            DiscussionType::Forum => DiscussionKind::Forum,
            DiscussionType::Announcement => DiscussionKind::Announcement,
        };

        errors.into_result(DiscussionDraft {
            title: title.to_string(),
            content: content.to_string(),
            created_by: author.to_string(),
            role: role.to_string(),
            kind,
        })
    }
}
