//! Portal API endpoints

use chrono::Utc;
use tracing::{debug, instrument};

use portal_core::{
    Announcement, Employee, Feedback, NewAnnouncement, NewFeedback, NewTask, NewTicket, Task,
    Ticket,
};

use crate::client::ApiClient;
use crate::error::Result;
use crate::wire::{decode_list, feedback_from_echo, ticket_from_echo};

pub const ANNOUNCEMENTS_PATH: &str = "/api/announcements";
pub const TASKS_PATH: &str = "/api/tasks";
pub const HELPDESK_PATH: &str = "/api/helpdesk";
pub const FEEDBACK_PATH: &str = "/api/feedback";
pub const EMPLOYEES_PATH: &str = "/api/employee";

/// Millisecond timestamp id for records the server did not name
fn fallback_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

impl ApiClient {
    #[instrument(skip(self))]
    pub async fn announcements(&self) -> Result<Vec<Announcement>> {
        let payload = self.get_json(ANNOUNCEMENTS_PATH).await?;
        let announcements = decode_list(&payload)?;
        debug!(count = announcements.len(), "Fetched announcements");
        Ok(announcements)
    }

    /// Create an announcement; callers re-fetch the list afterwards
    #[instrument(skip(self, announcement), fields(title = %announcement.title))]
    pub async fn create_announcement(&self, announcement: &NewAnnouncement) -> Result<()> {
        self.post(ANNOUNCEMENTS_PATH, announcement).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn tasks(&self) -> Result<Vec<Task>> {
        let payload = self.get_json(TASKS_PATH).await?;
        let tasks = decode_list(&payload)?;
        debug!(count = tasks.len(), "Fetched tasks");
        Ok(tasks)
    }

    /// Create a task; callers re-fetch the list afterwards
    #[instrument(skip(self, task), fields(title = %task.title))]
    pub async fn create_task(&self, task: &NewTask) -> Result<()> {
        self.post(TASKS_PATH, task).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn tickets(&self) -> Result<Vec<Ticket>> {
        let payload = self.get_json(HELPDESK_PATH).await?;
        let tickets = decode_list(&payload)?;
        debug!(count = tickets.len(), "Fetched tickets");
        Ok(tickets)
    }

    /// Raise a ticket, returning the server's record merged over what was sent
    #[instrument(skip(self, ticket), fields(ticket_type = %ticket.ticket_type))]
    pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket> {
        let echo = self.post_json(HELPDESK_PATH, ticket).await?;
        Ok(ticket_from_echo(
            &echo,
            ticket,
            fallback_id(),
            Utc::now().date_naive(),
        ))
    }

    #[instrument(skip(self))]
    pub async fn feedback(&self) -> Result<Vec<Feedback>> {
        let payload = self.get_json(FEEDBACK_PATH).await?;
        let feedback = decode_list(&payload)?;
        debug!(count = feedback.len(), "Fetched feedback");
        Ok(feedback)
    }

    /// Submit feedback, returning the server's record merged over what was sent
    #[instrument(skip(self, feedback))]
    pub async fn create_feedback(&self, feedback: &NewFeedback) -> Result<Feedback> {
        let echo = self.post_json(FEEDBACK_PATH, feedback).await?;
        Ok(feedback_from_echo(
            &echo,
            feedback,
            fallback_id(),
            Utc::now().date_naive(),
        ))
    }

    #[instrument(skip(self))]
    pub async fn employees(&self) -> Result<Vec<Employee>> {
        let payload = self.get_json(EMPLOYEES_PATH).await?;
        let employees = decode_list(&payload)?;
        debug!(count = employees.len(), "Fetched employees");
        Ok(employees)
    }
}
