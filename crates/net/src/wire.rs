//! Decoding of API payloads
//!
//! Records deserialize through the models' own serde derives, whose field
//! helpers absorb the server's loose typing. Only the outer shape is strict:
//! list payloads must be JSON arrays. A record that is not an object at all
//! is logged and skipped rather than failing the whole list.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use portal_core::{Feedback, NewFeedback, NewTicket, Ticket};

use crate::error::{Error, Result};

/// Decode a list payload, rejecting anything but a JSON array
pub fn decode_list<T: DeserializeOwned>(payload: &Value) -> Result<Vec<T>> {
    let items = payload.as_array().ok_or_else(Error::expected_array)?;
    Ok(items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, error = %e, "Skipping unreadable record");
                None
            }
        })
        .collect())
}

fn fill(field: &mut String, fallback: impl FnOnce() -> String) {
    if field.is_empty() {
        *field = fallback();
    }
}

/// Ticket from a create response, filling gaps from what was submitted
pub fn ticket_from_echo(echo: &Value, submitted: &NewTicket, fallback_id: String, today: NaiveDate) -> Ticket {
    let mut ticket = Ticket::deserialize(echo).unwrap_or_default();
    fill(&mut ticket.id, || fallback_id);
    fill(&mut ticket.raised_by, || submitted.raised_by.clone());
    fill(&mut ticket.ticket_type, || submitted.ticket_type.clone());
    fill(&mut ticket.description, || submitted.description.clone());
    fill(&mut ticket.department, || submitted.department.clone());
    fill(&mut ticket.created_at, || today.format("%Y-%m-%d").to_string());
    ticket
}

/// Feedback from a create response, filling gaps from what was submitted
pub fn feedback_from_echo(
    echo: &Value,
    submitted: &NewFeedback,
    fallback_id: String,
    today: NaiveDate,
) -> Feedback {
    let mut feedback = Feedback::deserialize(echo).unwrap_or_default();
    fill(&mut feedback.id, || fallback_id);
    fill(&mut feedback.user_id, || submitted.user_id.clone());
    fill(&mut feedback.content, || submitted.content.clone());
    fill(&mut feedback.created_at, || today.format("%Y-%m-%d").to_string());
    feedback
}
