//! Employee directory page

use chrono::NaiveDate;
use portal_core::filter::{directory_order, EmployeeFilter};
use portal_core::Employee;
use portal_net::{ApiClient, CancelHandle};

use super::{LoadState, Listing};

#[derive(Debug)]
pub struct EmployeesPage {
    listing: Listing<Employee>,
    pub filter: EmployeeFilter,
}

impl Default for EmployeesPage {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeesPage {
    pub fn new() -> Self {
        Self {
            listing: Listing::new("employees"),
            filter: EmployeeFilter::default(),
        }
    }

    /// Handle that cancels an in-flight [`EmployeesPage::load`]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.listing.cancel_handle()
    }

    pub async fn load(&mut self, api: &ApiClient) {
        self.listing.load(api.employees()).await;
    }

    pub fn state(&self) -> &LoadState {
        self.listing.state()
    }

    pub fn employees(&self) -> &[Employee] {
        self.listing.items()
    }

    /// Filtered directory, most senior positions first
    pub fn directory(&self) -> Vec<&Employee> {
        directory_order(self.listing.items(), &self.filter)
    }

    /// Distinct departments present in the loaded list, in first-seen order
    pub fn departments(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for employee in self.listing.items() {
            if !employee.department.is_empty() && !seen.contains(&employee.department.as_str()) {
                seen.push(&employee.department);
            }
        }
        seen
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.listing.items().iter().find(|e| e.id == id)
    }

    /// Tenure line for the detail view
    pub fn tenure(&self, id: &str, today: NaiveDate) -> Option<String> {
        self.employee(id)?.tenure(today)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewmodel::test_support::api_for;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    fn server() -> Router {
        Router::new().route(
            "/api/employee",
            get(|| async {
                Json(json!([
                    {"id": "1", "name": "Mike Chen", "position": "Senior Software Engineer",
                     "department": "Engineering", "email": "mike.chen@tecnics.com", "joinDate": "2020-03-15"},
                    {"id": "2", "name": "Sarah Johnson", "position": "Chief Executive Officer",
                     "department": "Executive", "email": "sarah.johnson@tecnics.com", "joinDate": "2015-01-01"},
                    {"id": "3", "name": "Nina Patel", "position": "Intern",
                     "department": "Engineering", "email": "nina.patel@tecnics.com", "joinDate": "2024-05-20"},
                    {"id": "4", "name": "Alex Rodriguez", "position": "Engineering Manager",
                     "department": "Engineering", "email": "alex.rodriguez@tecnics.com"}
                ]))
            }),
        )
    }

    #[tokio::test]
    async fn test_directory_ordered_by_seniority() {
        let mut page = EmployeesPage::new();
        page.load(&api_for(server()).await).await;
        assert_eq!(page.state(), &LoadState::Ready);

        let names: Vec<_> = page.directory().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Sarah Johnson", "Alex Rodriguez", "Mike Chen", "Nina Patel"]);

        page.filter.department = Some("Engineering".into());
        page.filter.search = "TECNICS".into();
        let ids: Vec<_> = page.directory().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "1", "3"]);

        assert_eq!(page.departments(), vec!["Engineering", "Executive"]);
    }

    #[tokio::test]
    async fn test_tenure() {
        let mut page = EmployeesPage::new();
        page.load(&api_for(server()).await).await;
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(page.tenure("1", today).as_deref(), Some("4 years"));
        assert_eq!(page.tenure("3", today).as_deref(), Some("1 month"));
        assert_eq!(page.tenure("4", today), None);
        assert_eq!(page.tenure("missing", today), None);
    }
}
