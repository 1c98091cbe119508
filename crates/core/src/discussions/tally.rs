//! Read-only views over a discussion: reaction counts and poll results

use crate::models::Discussion;

/// Vote count for one poll option
#[derive(Debug, Clone, PartialEq)]
pub struct OptionTally {
    pub option: String,
    pub count: usize,
    /// `100 * count / respondents`, unrounded
    pub percentage: f64,
}

impl OptionTally {
    /// Percentage rounded for display. Rounded values may not add up to 100.
    pub fn rounded_percentage(&self) -> u32 {
        self.percentage.round() as u32
    }
}

/// Poll results in option order
#[derive(Debug, Clone, PartialEq)]
pub struct PollTally {
    pub options: Vec<OptionTally>,
    pub total_responses: usize,
}

impl PollTally {
    pub fn for_option(&self, option: &str) -> Option<&OptionTally> {
        self.options.iter().find(|t| t.option == option)
    }
}

pub fn reaction_count_for(discussion: &Discussion, symbol: &str) -> usize {
    discussion
        .reactions()
        .iter()
        .filter(|r| r.reaction == symbol)
        .count()
}

/// The symbol `employee_id` picked last, if any
pub fn current_user_reaction<'a>(discussion: &'a Discussion, employee_id: &str) -> Option<&'a str> {
    discussion
        .reactions()
        .iter()
        .find(|r| r.employee_id == employee_id)
        .map(|r| r.reaction.as_str())
}

/// The option `employee_id` voted for, if the discussion is a poll
pub fn selected_option<'a>(discussion: &'a Discussion, employee_id: &str) -> Option<&'a str> {
    discussion
        .poll()?
        .poll_responses
        .get(employee_id)
        .map(String::as_str)
}

/// Per-option counts and percentages; `None` unless the discussion is a poll
pub fn poll_tally(discussion: &Discussion) -> Option<PollTally> {
    let poll = discussion.poll()?;
    let total = poll.poll_responses.len();

    let options = poll
        .options
        .iter()
        .map(|option| {
            let count = poll
                .poll_responses
                .values()
                .filter(|chosen| *chosen == option)
                .count();
            let percentage = if total > 0 {
                100.0 * count as f64 / total as f64
            } else {
                0.0
            };
            OptionTally {
                option: option.clone(),
                count,
                percentage,
            }
        })
        .collect();

    Some(PollTally {
        options,
        total_responses: total,
    })
}
