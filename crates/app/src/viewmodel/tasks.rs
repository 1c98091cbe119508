//! Task tracking page

use portal_core::filter::{apply, TaskFilter};
use portal_core::{NewTaskForm, PermissionMatrix, PortalAction, Task, TaskStats, User};
use portal_net::{ApiClient, CancelHandle};
use tracing::info;

use super::{LoadState, Listing, PageError};

#[derive(Debug)]
pub struct TasksPage {
    listing: Listing<Task>,
    pub filter: TaskFilter,
}

impl Default for TasksPage {
    fn default() -> Self {
        Self::new()
    }
}

impl TasksPage {
    pub fn new() -> Self {
        Self {
            listing: Listing::new("tasks"),
            filter: TaskFilter::default(),
        }
    }

    /// Handle that cancels an in-flight [`TasksPage::load`]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.listing.cancel_handle()
    }

    pub async fn load(&mut self, api: &ApiClient) {
        self.listing.load(api.tasks()).await;
    }

    pub fn state(&self) -> &LoadState {
        self.listing.state()
    }

    pub fn tasks(&self) -> &[Task] {
        self.listing.items()
    }

    pub fn visible(&self) -> Vec<&Task> {
        apply(self.listing.items(), &self.filter)
    }

    /// Counters over the whole list, not the filtered view
    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(self.listing.items())
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.listing.items().iter().find(|t| t.id == id)
    }

    pub fn can_create(user: &User) -> bool {
        PermissionMatrix::can_perform(user, PortalAction::CreateTask)
    }

    /// Submit the form, then reload the whole list from the server
    pub async fn create(
        &mut self,
        api: &ApiClient,
        user: &User,
        form: &NewTaskForm,
    ) -> Result<(), PageError> {
        if !Self::can_create(user) {
            return Err(PageError::Forbidden("create tasks"));
        }
        let task = form.validate()?;
        api.create_task(&task).await?;
        info!(title = %task.title, team = %task.team, "Task created");
        self.listing.refresh(api.tasks()).await
    }

}
