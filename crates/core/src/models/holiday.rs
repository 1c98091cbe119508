//! Company holiday calendar. Holidays live only on the client.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FieldErrors, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
}

impl Holiday {
    /// e.g. "Monday"
    pub fn weekday_name(&self) -> String {
        self.date.format("%A").to_string()
    }

    /// e.g. "January 26, 2024"
    pub fn long_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }
}

/// Raw input of the "add holiday" dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewHoliday {
    pub name: String,
    pub date: Option<NaiveDate>,
}

impl NewHoliday {
    pub fn validate(&self) -> Result<(String, NaiveDate)> {
        let mut errors = FieldErrors::new();
        if self.name.is_empty() {
            errors.add("name", "Holiday name is required");
        }
        match self.date {
            Some(date) => errors.into_result((self.name.clone(), date)),
            None => {
                errors.add("date", "Date is required");
                Err(crate::error::Error::Validation(errors))
            }
        }
    }
}

/// Holidays shown before anyone adds one
pub fn seed_holidays() -> Vec<Holiday> {
    [
        ("1", "New Year's Day", (2024, 1, 1)),
        ("2", "Republic Day", (2024, 1, 26)),
        ("3", "Holi", (2024, 3, 25)),
        ("4", "Good Friday", (2024, 3, 29)),
        ("5", "Independence Day", (2024, 8, 15)),
        ("6", "Gandhi Jayanti", (2024, 10, 2)),
        ("7", "Diwali", (2024, 11, 1)),
        ("8", "Christmas Day", (2024, 12, 25)),
        ("9", "Company Foundation Day", (2024, 9, 15)),
    ]
    .into_iter()
    .filter_map(|(id, name, (y, m, d))| {
        Some(Holiday {
            id: id.to_string(),
            name: name.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d)?,
        })
    })
    .collect()
}
