//! Search and filter layer
//!
//! Every list page narrows its collection with a free-text query, matched
//! case-insensitively against a few fields of each item, ANDed with
//! optional categorical selections. Filtering is a pure function of the
//! collection and the filter value: results keep collection order.

use crate::models::{
    position_rank, Announcement, Discussion, DiscussionType, Employee, Feedback, Holiday, Priority,
    Task, TaskStatus, Ticket, TicketStatus,
};

/// Items the search box can look into
pub trait Searchable {
    /// Fields the free-text query is matched against
    fn search_fields(&self) -> Vec<&str>;

    /// True if any field contains `term`, ignoring case. Empty terms match.
    fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        needle.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// A filter value for one kind of list item
pub trait ListFilter<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Visible subset of `items`, in collection order
pub fn apply<'a, T, F>(items: &'a [T], filter: &F) -> Vec<&'a T>
where
    F: ListFilter<T>,
{
    items.iter().filter(|item| filter.matches(item)).collect()
}

fn selected<T: PartialEq>(selection: &Option<T>, value: &T) -> bool {
    selection.as_ref().map_or(true, |s| s == value)
}

impl Searchable for Discussion {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.content, &self.created_by]
    }
}

impl Searchable for Announcement {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.description, &self.author]
    }
}

impl Searchable for Task {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = vec![&self.title, &self.description];
        fields.extend(self.assigned_to.iter().map(String::as_str));
        fields
    }
}

impl Searchable for Ticket {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.description, &self.raised_by, &self.ticket_type]
    }
}

impl Searchable for Feedback {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.content, &self.user_id]
    }
}

impl Searchable for Employee {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.position, &self.department, &self.email]
    }
}

impl Searchable for Holiday {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscussionFilter {
    pub search: String,
    pub discussion_type: Option<DiscussionType>,
}

impl ListFilter<Discussion> for DiscussionFilter {
    fn matches(&self, item: &Discussion) -> bool {
        item.matches_search(&self.search)
            && selected(&self.discussion_type, &item.discussion_type())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnouncementFilter {
    pub search: String,
    pub priority: Option<Priority>,
}

impl ListFilter<Announcement> for AnnouncementFilter {
    fn matches(&self, item: &Announcement) -> bool {
        item.matches_search(&self.search) && selected(&self.priority, &item.priority)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub search: String,
    pub team: Option<String>,
    pub status: Option<TaskStatus>,
}

impl ListFilter<Task> for TaskFilter {
    fn matches(&self, item: &Task) -> bool {
        item.matches_search(&self.search)
            && selected(&self.team, &item.team)
            && selected(&self.status, &item.status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub search: String,
    pub status: Option<TicketStatus>,
    pub ticket_type: Option<String>,
}

impl ListFilter<Ticket> for TicketFilter {
    fn matches(&self, item: &Ticket) -> bool {
        item.matches_search(&self.search)
            && selected(&self.status, &item.status)
            && selected(&self.ticket_type, &item.ticket_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackFilter {
    pub search: String,
}

impl ListFilter<Feedback> for FeedbackFilter {
    fn matches(&self, item: &Feedback) -> bool {
        item.matches_search(&self.search)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub search: String,
    pub department: Option<String>,
}

impl ListFilter<Employee> for EmployeeFilter {
    fn matches(&self, item: &Employee) -> bool {
        item.matches_search(&self.search) && selected(&self.department, &item.department)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayFilter {
    pub search: String,
}

impl ListFilter<Holiday> for HolidayFilter {
    fn matches(&self, item: &Holiday) -> bool {
        item.matches_search(&self.search)
    }
}

/// Directory view: filtered, then ordered by seniority (stable among equals)
pub fn directory_order<'a>(employees: &'a [Employee], filter: &EmployeeFilter) -> Vec<&'a Employee> {
    let mut visible = apply(employees, filter);
    visible.sort_by_key(|e| position_rank(&e.position));
    visible
}
