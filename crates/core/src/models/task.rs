//! Task tracking model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{lenient, Priority};
use crate::error::{Error, FieldErrors, Result};

/// Teams a task can be assigned to, in form order
pub const TEAMS: &[&str] = &[
    "Engineering",
    "Design",
    "Marketing",
    "Product",
    "QA",
    "Operations",
    "Sales",
];

/// Assignee suggestions for a team
pub fn team_members(team: &str) -> &'static [&'static str] {
    match team {
        "Engineering" => &[
            "John Doe",
            "Sarah Wilson",
            "Alex Rodriguez",
            "Jennifer Lee",
            "Robert Taylor",
        ],
        "Design" => &["Emma Davis", "Mike Chen", "Sophie Turner"],
        "Marketing" => &["Lisa Anderson", "David Kim", "Amanda White"],
        "Product" => &["Kevin Brown", "Rachel Green", "James Wilson"],
        "QA" => &["Maria Garcia", "Thomas Anderson"],
        "Operations" => &["Michael Johnson", "Jessica Brown"],
        "Sales" => &["Daniel Wilson", "Laura Davis"],
        _ => &[],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Overdue,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "not-started",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Overdue => "overdue",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    /// Accepts both wire form (`in-progress`) and label form (`In Progress`)
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', " ").as_str() {
            "not started" => Ok(TaskStatus::NotStarted),
            "in progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "overdue" => Ok(TaskStatus::Overdue),
            other => Err(Error::InvalidOperation(format!("unknown task status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    #[serde(alias = "_id", deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::title")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::parsed")]
    pub priority: Option<Priority>,
    #[serde(deserialize_with = "lenient::parsed_or_default")]
    pub status: TaskStatus,
    #[serde(deserialize_with = "lenient::strings")]
    pub assigned_to: Vec<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub team: String,
    #[serde(deserialize_with = "lenient::text")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient::text")]
    pub deadline: String,
    /// Zero-based index into [`TaskPhase::ALL`]
    #[serde(deserialize_with = "lenient::index")]
    pub current_phase: usize,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: "Untitled".to_string(),
            description: String::new(),
            priority: None,
            status: TaskStatus::NotStarted,
            assigned_to: Vec::new(),
            team: String::new(),
            start_date: String::new(),
            deadline: String::new(),
            current_phase: 0,
        }
    }
}

impl Task {
    pub fn phase(&self) -> TaskPhase {
        TaskPhase::at(self.current_phase)
    }

    /// Where `phase` stands relative to the task's current phase
    pub fn phase_status(&self, phase: TaskPhase) -> PhaseStatus {
        let index = phase.index();
        let current = self.current_phase.min(TaskPhase::ALL.len() - 1);
        if index < current {
            PhaseStatus::Completed
        } else if index == current {
            PhaseStatus::Current
        } else {
            PhaseStatus::Pending
        }
    }

    /// Progress through the phase pipeline, 20..=100
    pub fn progress_percent(&self) -> u32 {
        let total = TaskPhase::ALL.len() as f64;
        let done = (self.phase().index() + 1) as f64;
        (done / total * 100.0).round() as u32
    }

    /// Assignee line: first two names plus a "+N more" suffix
    pub fn assignee_summary(&self) -> String {
        let mut summary = self
            .assigned_to
            .iter()
            .take(2)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        if self.assigned_to.len() > 2 {
            summary.push_str(&format!(" +{} more", self.assigned_to.len() - 2));
        }
        summary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskPhase {
    Planning,
    Designing,
    Implementing,
    Testing,
    Deployment,
}

impl TaskPhase {
    pub const ALL: [TaskPhase; 5] = [
        TaskPhase::Planning,
        TaskPhase::Designing,
        TaskPhase::Implementing,
        TaskPhase::Testing,
        TaskPhase::Deployment,
    ];

    /// Phase at `index`, clamped to the last phase
    pub fn at(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            TaskPhase::Planning => "Planning",
            TaskPhase::Designing => "Designing",
            TaskPhase::Implementing => "Implementing",
            TaskPhase::Testing => "Testing",
            TaskPhase::Deployment => "Deployment",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TaskPhase::Planning => "Project planning, requirements gathering, and resource allocation",
            TaskPhase::Designing => "UI/UX design, system architecture, and technical specifications",
            TaskPhase::Implementing => "Development, coding, and feature implementation",
            TaskPhase::Testing => "Quality assurance, bug fixes, and performance testing",
            TaskPhase::Deployment => "Production deployment, monitoring, and final delivery",
        }
    }

    pub fn typical_duration(&self) -> &'static str {
        match self {
            TaskPhase::Planning => "1-2 weeks",
            TaskPhase::Designing => "2-3 weeks",
            TaskPhase::Implementing => "4-6 weeks",
            TaskPhase::Testing => "1-2 weeks",
            TaskPhase::Deployment => "1 week",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStatus {
    Completed,
    Current,
    Pending,
}

/// Header counters on the tasks page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub overdue: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();
        Self {
            total: tasks.len(),
            completed: count(TaskStatus::Completed),
            in_progress: count(TaskStatus::InProgress),
            overdue: count(TaskStatus::Overdue),
        }
    }
}

/// Body of `POST /api/tasks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assigned_to: Vec<String>,
    pub team: String,
    pub start_date: String,
    pub deadline: String,
}

/// Raw input of the "new task" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTaskForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assigned_to: Vec<String>,
    pub team: String,
    pub start_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
}

impl NewTaskForm {
    /// Add an assignee once; repeated names are ignored
    pub fn add_assignee(&mut self, member: &str) {
        if !self.assigned_to.iter().any(|m| m == member) {
            self.assigned_to.push(member.to_string());
        }
    }

    pub fn remove_assignee(&mut self, member: &str) {
        self.assigned_to.retain(|m| m != member);
    }

    /// Switching team clears the assignee list
    pub fn set_team(&mut self, team: &str) {
        self.team = team.to_string();
        self.assigned_to.clear();
    }

    pub fn validate(&self) -> Result<NewTask> {
        let mut errors = FieldErrors::new();

        if self.title.trim().is_empty() {
            errors.add("title", "Task title is required");
        }
        if self.description.trim().is_empty() {
            errors.add("description", "Task description is required");
        }
        if self.team.is_empty() {
            errors.add("team", "Team selection is required");
        }
        if self.assigned_to.is_empty() {
            errors.add("assignedTo", "At least one team member must be assigned");
        }
        if self.start_date.is_none() {
            errors.add("startDate", "Start date is required");
        }
        if self.deadline.is_none() {
            errors.add("deadline", "Deadline is required");
        }
        if let (Some(start), Some(deadline)) = (self.start_date, self.deadline) {
            if start >= deadline {
                errors.add("deadline", "Deadline must be after start date");
            }
        }

        let format = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
        errors.into_result(NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            assigned_to: self.assigned_to.clone(),
            team: self.team.clone(),
            start_date: format(self.start_date),
            deadline: format(self.deadline),
        })
    }
}
