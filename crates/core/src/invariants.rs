//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::models::{Discussion, DiscussionKind};

/// Validate that a discussion's state is internally consistent
pub fn assert_discussion_invariants(discussion: &Discussion) {
    debug_assert!(
        !discussion.id.is_empty(),
        "Discussion {:?} has empty id",
        discussion.title
    );

    // One reaction per employee
    let mut seen = HashSet::new();
    for reaction in discussion.reactions() {
        debug_assert!(
            seen.insert(reaction.employee_id.as_str()),
            "Discussion {} has several reactions from {}",
            discussion.id,
            reaction.employee_id
        );
    }

    if let DiscussionKind::Poll(poll) = discussion.kind() {
        debug_assert!(
            poll.options.len() >= 2,
            "Poll {} has {} options, expected at least 2",
            discussion.id,
            poll.options.len()
        );
    }
}

/// Validate that every id in a list is distinct
pub fn assert_unique_ids<'a, I>(ids: I, context: &str)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        debug_assert!(seen.insert(id), "Duplicate id {id:?} in {context}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids_pass() {
        assert_unique_ids(["a", "b", "c"], "test");
    }

    #[test]
    #[should_panic(expected = "Duplicate id")]
    #[cfg(debug_assertions)]
    fn test_duplicate_ids_caught() {
        assert_unique_ids(["a", "b", "a"], "test");
    }
}
