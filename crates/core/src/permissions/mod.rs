//! Role gate for portal affordances
//!
//! These predicates only decide which buttons and dialogs the client shows.
//! They are not an authorization layer: anyone can call the API directly,
//! so the server must enforce every rule on its own.

use crate::models::{Feedback, Ticket, User};

/// Roles allowed to publish announcements, tasks and discussions
pub const AUTHORIZED_ROLES: &[&str] = &["hr", "vp", "marketingHead", "techHead", "admin", "director"];

/// Roles allowed to edit the holiday calendar
pub const HOLIDAY_EDITOR_ROLES: &[&str] = &["admin", "hr"];

/// Client-side actions gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalAction {
    CreateAnnouncement,
    CreateTask,
    CreateDiscussion,
    AddHoliday,
    /// Change status of, or delete, any ticket
    ModerateTickets,
    /// Edit or delete any feedback entry
    ModerateFeedback,
}

/// Permission matrix for portal roles
pub struct PermissionMatrix;

impl PermissionMatrix {
    /// Check if a user's role shows the affordance for an action
    pub fn can_perform(user: &User, action: PortalAction) -> bool {
        match action {
            PortalAction::CreateAnnouncement
            | PortalAction::CreateTask
            | PortalAction::CreateDiscussion => can_create_content(user),

            PortalAction::AddHoliday => HOLIDAY_EDITOR_ROLES.contains(&user.role.as_str()),

            PortalAction::ModerateTickets | PortalAction::ModerateFeedback => {
                has_role(user, "admin")
            }
        }
    }
}

pub fn can_create_content(user: &User) -> bool {
    AUTHORIZED_ROLES.contains(&user.role.as_str())
}

/// Exact, case-sensitive role comparison
pub fn has_role(user: &User, role: &str) -> bool {
    user.role == role
}

pub fn can_add_holiday(user: &User) -> bool {
    PermissionMatrix::can_perform(user, PortalAction::AddHoliday)
}

/// Requester or admin
pub fn can_modify_ticket(user: &User, ticket: &Ticket) -> bool {
    ticket.raised_by == user.name || PermissionMatrix::can_perform(user, PortalAction::ModerateTickets)
}

/// Author or admin
pub fn can_modify_feedback(user: &User, feedback: &Feedback) -> bool {
    feedback.user_id == user.name
        || PermissionMatrix::can_perform(user, PortalAction::ModerateFeedback)
}
