//! Help-desk tickets

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::lenient;
use crate::error::{Error, FieldErrors, Result};

/// Ticket categories offered by the help-desk form
pub const TICKET_TYPES: &[&str] = &[
    "Technical Issue",
    "Account Access",
    "Hardware Request",
    "Software Installation",
    "Network Issue",
    "General Inquiry",
    "Bug Report",
    "Feature Request",
];

/// Departments a ticket can be raised for
pub const TICKET_DEPARTMENTS: &[&str] = &[
    "Information Technology",
    "Human Resources",
    "Finance",
    "Operations",
    "Marketing",
    "Sales",
    "Legal",
    "Executive",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TicketStatus {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', " ").as_str() {
            "open" => Ok(TicketStatus::Open),
            "in progress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            other => Err(Error::InvalidOperation(format!("unknown ticket status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ticket {
    #[serde(alias = "_id", deserialize_with = "lenient::text")]
    pub id: String,
    /// Display name of the requester
    #[serde(deserialize_with = "lenient::text")]
    pub raised_by: String,
    #[serde(rename = "type", deserialize_with = "lenient::text")]
    pub ticket_type: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::parsed_or_default")]
    pub status: TicketStatus,
    #[serde(deserialize_with = "lenient::text")]
    pub department: String,
    /// `YYYY-MM-DD`
    #[serde(deserialize_with = "lenient::date_part")]
    pub created_at: String,
}

/// Header counters on the help-desk page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl TicketStats {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        let count = |status: TicketStatus| tickets.iter().filter(|t| t.status == status).count();
        Self {
            total: tickets.len(),
            open: count(TicketStatus::Open),
            in_progress: count(TicketStatus::InProgress),
            resolved: count(TicketStatus::Resolved),
        }
    }
}

/// Body of `POST /api/helpdesk`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub raised_by: String,
    #[serde(rename = "type")]
    pub ticket_type: String,
    pub description: String,
    pub status: TicketStatus,
    pub department: String,
}

impl NewTicket {
    /// A blank open ticket raised by `raised_by`
    pub fn raised_by(raised_by: &str) -> Self {
        Self {
            raised_by: raised_by.to_string(),
            ticket_type: String::new(),
            description: String::new(),
            status: TicketStatus::Open,
            department: String::new(),
        }
    }

    pub fn validate(self) -> Result<Self> {
        let mut errors = FieldErrors::new();
        if self.ticket_type.is_empty() {
            errors.add("type", "Ticket type is required");
        }
        if self.description.trim().is_empty() {
            errors.add("description", "Description is required");
        }
        if self.department.is_empty() {
            errors.add("department", "Department is required");
        }
        errors.into_result(self)
    }
}
