//! Employee feedback entries

use serde::{Deserialize, Serialize};

use super::lenient;

use crate::error::{FieldErrors, Result};

/// Shortest accepted feedback, in characters after trimming
pub const MIN_FEEDBACK_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Feedback {
    #[serde(alias = "_id", deserialize_with = "lenient::text")]
    pub id: String,
    /// Author display name
    #[serde(deserialize_with = "lenient::text")]
    pub user_id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub content: String,
    /// `YYYY-MM-DD`
    #[serde(deserialize_with = "lenient::date_part")]
    pub created_at: String,
}

/// Body of `POST /api/feedback`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    pub content: String,
    pub user_id: String,
}

/// Validate feedback text, returning it trimmed
pub fn validate_feedback_content(content: &str) -> Result<String> {
    let mut errors = FieldErrors::new();
    let trimmed = content.trim();
    if trimmed.is_empty() {
        errors.add("content", "Feedback content is required");
    } else if trimmed.chars().count() < MIN_FEEDBACK_CHARS {
        errors.add(
            "content",
            format!("Feedback must be at least {MIN_FEEDBACK_CHARS} characters long"),
        );
    }
    errors.into_result(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_feedback_length_rule() {
        assert_eq!(
            validate_feedback_content("  Great onboarding!  ").unwrap(),
            "Great onboarding!"
        );
        match validate_feedback_content("short").unwrap_err() {
            Error::Validation(f) => assert_eq!(
                f.get("content"),
                Some("Feedback must be at least 10 characters long")
            ),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(validate_feedback_content("   ").is_err());
    }
}
