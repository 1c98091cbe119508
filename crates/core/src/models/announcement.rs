//! Company announcements

use serde::{Deserialize, Serialize};

use super::{lenient, Priority};
use crate::error::{FieldErrors, Result};

/// Server record; missing or odd fields fall back to defaults
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Announcement {
    #[serde(alias = "_id", deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::parsed_or_default")]
    pub priority: Priority,
    #[serde(deserialize_with = "lenient::text")]
    pub category: String,
    #[serde(deserialize_with = "lenient::text")]
    pub author: String,
    #[serde(deserialize_with = "lenient::text")]
    pub department: String,
    #[serde(deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
}

/// Body of `POST /api/announcements`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnnouncement {
    pub title: String,
    pub priority: Priority,
    pub category: String,
    pub author: String,
    pub department: String,
    pub date: String,
    pub description: String,
}

impl NewAnnouncement {
    pub fn validate(self) -> Result<Self> {
        let mut errors = FieldErrors::new();
        if self.title.trim().is_empty() {
            errors.add("title", "Title is required");
        }
        if self.description.trim().is_empty() {
            errors.add("description", "Description is required");
        }
        if self.category.trim().is_empty() {
            errors.add("category", "Category is required");
        }
        errors.into_result(Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            ..self
        })
    }
}
