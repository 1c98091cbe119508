//! Page view models
//!
//! One owned value per page. A page is built when it mounts and loads its
//! collection once. Before the load starts the caller can take a
//! [`CancelHandle`] from the page; cancelling it, or dropping the page,
//! abandons a load still in flight.

mod announcements;
mod auth;
mod dashboard;
mod discussions;
mod employees;
mod feedback;
mod helpdesk;
mod holidays;
mod tasks;

use std::future::Future;

use portal_core::{EntityList, Identified};
use portal_net::{CancelHandle, CancelScope};
use tracing::{debug, error};

pub use announcements::AnnouncementsPage;
pub use auth::LoginForm;
pub use dashboard::DashboardPage;
pub use discussions::{DiscussionsPage, ReactionSummary};
pub use employees::EmployeesPage;
pub use feedback::FeedbackPage;
pub use helpdesk::HelpdeskPage;
pub use holidays::HolidaysPage;
pub use tasks::TasksPage;

/// Errors surfaced by page actions
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Net(#[from] portal_net::Error),

    #[error(transparent)]
    Core(#[from] portal_core::Error),

    #[error("Your role cannot {0}")]
    Forbidden(&'static str),

    #[error("No {0} with id {1}")]
    Missing(&'static str, String),
}

impl PageError {
    /// True when the page should send the user back to the login view
    pub fn needs_login(&self) -> bool {
        matches!(self, PageError::Net(e) if e.needs_login())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// Message shown in place of the page
    Failed(String),
}

/// Message shown when loading `resource` fails
pub fn load_error_message(resource: &str, err: &portal_net::Error) -> String {
    match err {
        portal_net::Error::Http { .. } => format!("Failed to fetch {resource}: {err}"),
        other => other.to_string(),
    }
}

/// Message shown when an action on the page fails
pub fn action_error_message(action: &str, err: &PageError) -> String {
    match err {
        PageError::Net(e @ portal_net::Error::Http { body, .. }) if !body.is_empty() => {
            format!("Failed to {action}: {e} - {body}")
        }
        PageError::Net(e @ portal_net::Error::Http { .. }) => format!("Failed to {action}: {e}"),
        other => other.to_string(),
    }
}

/// Fetched collection plus its load state, owned by one page
#[derive(Debug)]
pub struct Listing<T> {
    resource: &'static str,
    items: EntityList<T>,
    state: LoadState,
    scope: CancelScope,
}

impl<T: Identified> Listing<T> {
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            items: EntityList::new(),
            state: LoadState::Loading,
            scope: CancelScope::new(),
        }
    }

    pub fn items(&self) -> &[T] {
        self.items.items()
    }

    pub fn list_mut(&mut self) -> &mut EntityList<T> {
        &mut self.items
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.scope.handle()
    }

    /// Run `fetch` under the page's scope and record the outcome.
    ///
    /// A cancelled fetch leaves items and state as they were. Any other
    /// failure empties the list and puts the page into the error state.
    pub async fn load<F>(&mut self, fetch: F)
    where
        F: Future<Output = portal_net::Result<Vec<T>>>,
    {
        match self.scope.token().run(fetch).await {
            Ok(items) => {
                debug!(resource = self.resource, count = items.len(), "Loaded");
                self.items.replace_all(items);
                self.state = LoadState::Ready;
            }
            Err(portal_net::Error::Cancelled) => {
                debug!(resource = self.resource, "Load cancelled");
            }
            Err(e) => {
                error!(resource = self.resource, error = %e, "Load failed");
                self.items.clear();
                self.state = LoadState::Failed(load_error_message(self.resource, &e));
            }
        }
    }

    /// Re-fetch after a create; errors go to the caller, state is kept
    pub async fn refresh<F>(&mut self, fetch: F) -> Result<(), PageError>
    where
        F: Future<Output = portal_net::Result<Vec<T>>>,
    {
        let items = self.scope.token().run(fetch).await?;
        self.items.replace_all(items);
        self.state = LoadState::Ready;
        Ok(())
    }
}
