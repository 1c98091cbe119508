//! Employee directory records

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::lenient;
use super::user::initials;

/// Departments offered by the directory filter
pub const DEPARTMENTS: &[&str] = &[
    "Information Technology",
    "Design",
    "Marketing",
    "Human Resources",
    "Executive",
    "Finance",
    "Customer Success",
];

/// Directory ordering, most senior first
pub const POSITION_HIERARCHY: &[&str] = &[
    "Chief Executive Officer",
    "VP of Human Resources",
    "Engineering Manager",
    "Design Director",
    "Marketing Head",
    "Finance Director",
    "Senior Software Engineer",
    "UX/UI Designer",
    "Marketing Specialist",
    "HR Business Partner",
    "Financial Analyst",
    "Customer Success Manager",
];

/// Rank given to positions missing from [`POSITION_HIERARCHY`]
pub const UNKNOWN_POSITION_RANK: usize = 999;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    #[serde(alias = "_id", deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub position: String,
    #[serde(deserialize_with = "lenient::text")]
    pub department: String,
    #[serde(deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(deserialize_with = "lenient::text")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(deserialize_with = "lenient::text")]
    pub birthday: String,
    #[serde(deserialize_with = "lenient::text")]
    pub join_date: String,
    #[serde(deserialize_with = "lenient::text")]
    pub manager: String,
    #[serde(deserialize_with = "lenient::strings")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub bio: String,
    #[serde(deserialize_with = "lenient::non_empty")]
    pub avatar: Option<String>,
}

impl Employee {
    pub fn initials(&self) -> String {
        initials(&self.name)
    }

    pub fn position_rank(&self) -> usize {
        position_rank(&self.position)
    }

    /// Time at the company as of `today`, or `None` if the join date is unreadable
    pub fn tenure(&self, today: NaiveDate) -> Option<String> {
        let joined = parse_date_prefix(&self.join_date)?;
        Some(describe_tenure(joined, today))
    }
}

pub fn position_rank(position: &str) -> usize {
    POSITION_HIERARCHY
        .iter()
        .position(|p| *p == position)
        .unwrap_or(UNKNOWN_POSITION_RANK)
}

/// Calendar-difference wording: whole years first, then months
pub fn describe_tenure(joined: NaiveDate, today: NaiveDate) -> String {
    let years = today.year() - joined.year();
    let months = today.month() as i32 - joined.month() as i32;

    if years > 0 {
        format!("{years} year{}", if years > 1 { "s" } else { "" })
    } else if months > 0 {
        format!("{months} month{}", if months > 1 { "s" } else { "" })
    } else {
        "Less than a month".to_string()
    }
}

/// Parse `YYYY-MM-DD` from the start of a date or timestamp string
pub fn parse_date_prefix(value: &str) -> Option<NaiveDate> {
    let prefix = value.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}
