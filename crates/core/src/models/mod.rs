//! Data models for the portal

mod announcement;
mod discussion;
mod employee;
mod feedback;
mod holiday;
mod lenient;
mod priority;
mod task;
mod ticket;
mod user;

pub use announcement::*;
pub use discussion::*;
pub use employee::*;
pub use feedback::*;
pub use holiday::*;
pub use priority::*;
pub use task::*;
pub use ticket::*;
pub use user::*;
