//! Help-desk tickets page

use portal_core::filter::{apply, TicketFilter};
use portal_core::{can_modify_ticket, NewTicket, Ticket, TicketStats, TicketStatus, User};
use portal_net::{ApiClient, CancelHandle};
use tracing::info;

use super::{LoadState, Listing, PageError};

#[derive(Debug)]
pub struct HelpdeskPage {
    listing: Listing<Ticket>,
    pub filter: TicketFilter,
}

impl Default for HelpdeskPage {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpdeskPage {
    pub fn new() -> Self {
        Self {
            listing: Listing::new("tickets"),
            filter: TicketFilter::default(),
        }
    }

    /// Handle that cancels an in-flight [`HelpdeskPage::load`]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.listing.cancel_handle()
    }

    pub async fn load(&mut self, api: &ApiClient) {
        self.listing.load(api.tickets()).await;
    }

    pub fn state(&self) -> &LoadState {
        self.listing.state()
    }

    pub fn tickets(&self) -> &[Ticket] {
        self.listing.items()
    }

    pub fn visible(&self) -> Vec<&Ticket> {
        apply(self.listing.items(), &self.filter)
    }

    pub fn stats(&self) -> TicketStats {
        TicketStats::from_tickets(self.listing.items())
    }

    /// Raise a ticket and put the server's copy at the top of the list
    pub async fn create(&mut self, api: &ApiClient, ticket: NewTicket) -> Result<&Ticket, PageError> {
        let ticket = ticket.validate()?;
        let created = api.create_ticket(&ticket).await?;
        info!(id = %created.id, ticket_type = %created.ticket_type, "Ticket raised");

        let list = self.listing.list_mut();
        list.prepend(created);
        Ok(&list.items()[0])
    }

    /// Change a ticket's status locally; only its requester or an admin may
    pub fn update_status(&mut self, user: &User, id: &str, status: TicketStatus) -> Result<(), PageError> {
        self.check_owner(user, id)?;
        self.listing.list_mut().update(id, |t| t.status = status);
        info!(id, status = %status, "Ticket status changed");
        Ok(())
    }

    /// Remove a ticket locally; only its requester or an admin may
    pub fn delete(&mut self, user: &User, id: &str) -> Result<Ticket, PageError> {
        self.check_owner(user, id)?;
        self.listing
            .list_mut()
            .remove(id)
            .ok_or_else(|| PageError::Missing("ticket", id.to_string()))
    }

    fn check_owner(&self, user: &User, id: &str) -> Result<(), PageError> {
        let ticket = self
            .listing
            .items()
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| PageError::Missing("ticket", id.to_string()))?;
        if can_modify_ticket(user, ticket) {
            Ok(())
        } else {
            Err(PageError::Forbidden("modify this ticket"))
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewmodel::test_support::api_for;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    fn server() -> Router {
        Router::new().route(
            "/api/helpdesk",
            get(|| async {
                Json(json!([
                    {"_id": "t1", "raisedBy": "John Doe", "type": "Hardware Issue",
                     "description": "Laptop fan", "status": "Open", "createdAt": "2024-01-10T09:00:00Z"},
                    {"_id": "t2", "raisedBy": "Emma Davis", "type": "Software Issue",
                     "description": "Figma license", "status": "Resolved"}
                ]))
            })
            .post(|Json(body): Json<Value>| async move {
                Json(json!({"_id": "t3", "raisedBy": body["raisedBy"], "type": body["type"]}))
            }),
        )
    }

    fn user(name: &str, role: &str) -> User {
        User {
            name: name.into(),
            role: role.into(),
            ..User::default()
        }
    }

    #[tokio::test]
    async fn test_load_filter_and_stats() {
        let mut page = HelpdeskPage::new();
        page.load(&api_for(server()).await).await;
        assert_eq!(page.state(), &LoadState::Ready);
        assert_eq!(page.tickets()[0].created_at, "2024-01-10");

        let stats = page.stats();
        assert_eq!((stats.total, stats.open, stats.resolved), (2, 1, 1));

        page.filter.status = Some(TicketStatus::Resolved);
        assert_eq!(page.visible()[0].id, "t2");
        page.filter = TicketFilter {
            search: "laptop".into(),
            ..Default::default()
        };
        assert_eq!(page.visible()[0].id, "t1");
    }

    #[tokio::test]
    async fn test_create_prepends_echo() {
        let api = api_for(server()).await;
        let mut page = HelpdeskPage::new();
        page.load(&api).await;

        let mut ticket = NewTicket::raised_by("John Doe");
        ticket.ticket_type = "Access Request".into();
        ticket.description = "Shared drive".into();
        ticket.department = "Finance".into();

        let created = page.create(&api, ticket).await.unwrap();
        assert_eq!(created.id, "t3");
        assert_eq!(created.department, "Finance");
        assert_eq!(page.tickets().len(), 3);
        assert_eq!(page.tickets()[0].id, "t3");
    }

    #[tokio::test]
    async fn test_owner_or_admin_may_modify() {
        let mut page = HelpdeskPage::new();
        page.load(&api_for(server()).await).await;

        let emma = user("Emma Davis", "employee");
        let err = page.update_status(&emma, "t1", TicketStatus::Resolved).unwrap_err();
        assert!(matches!(err, PageError::Forbidden(_)));
        assert_eq!(page.tickets()[0].status, TicketStatus::Open);

        let john = user("John Doe", "employee");
        page.update_status(&john, "t1", TicketStatus::InProgress).unwrap();
        assert_eq!(page.tickets()[0].status, TicketStatus::InProgress);

        let admin = user("Ada Admin", "admin");
        let removed = page.delete(&admin, "t2").unwrap();
        assert_eq!(removed.raised_by, "Emma Davis");
        assert!(matches!(page.delete(&admin, "t2"), Err(PageError::Missing(..))));
    }
}
