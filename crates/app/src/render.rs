//! Terminal output for the `portal` command

use chrono::NaiveDate;
use portal_core::discussions::PollTally;
use portal_core::{
    Announcement, Discussion, Employee, Feedback, Holiday, PhaseStatus, Task, TaskPhase,
    TaskStats, Ticket, TicketStats, User,
};
use serde::Serialize;

use crate::viewmodel::{LoadState, ReactionSummary};

/// Pretty JSON on stdout
pub fn json<T: Serialize + ?Sized>(value: &T) -> portal_core::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the page's error message; returns false when there is nothing else to show
pub fn load_state(state: &LoadState) -> bool {
    match state {
        LoadState::Failed(message) => {
            eprintln!("Error: {message}");
            false
        }
        LoadState::Loading => {
            eprintln!("Cancelled");
            false
        }
        LoadState::Ready => true,
    }
}

pub fn user(user: &User) {
    println!("{} ({})", user.name, user.initials());
    println!("  email:      {}", user.email);
    println!("  role:       {}", user.role);
    println!("  department: {}", user.department);
}

pub fn announcements(items: &[&Announcement]) {
    if items.is_empty() {
        println!("No announcements");
        return;
    }
    for a in items {
        println!(
            "{} [{}] {}  ({}, {})",
            a.priority.icon(),
            a.category,
            a.title,
            a.author,
            a.date
        );
        if !a.description.is_empty() {
            println!("    {}", a.description);
        }
    }
}

pub fn task_stats(stats: &TaskStats) {
    println!(
        "Total {}  Completed {}  In progress {}  Overdue {}",
        stats.total, stats.completed, stats.in_progress, stats.overdue
    );
}

pub fn tasks(items: &[&Task]) {
    if items.is_empty() {
        println!("No tasks");
        return;
    }
    for t in items {
        let priority = t.priority.map(|p| p.as_str()).unwrap_or("-");
        println!(
            "#{:<6} {:<32} {:<12} {:<7} {:>3}%  {}",
            t.id,
            t.title,
            t.status.label(),
            priority,
            t.progress_percent(),
            t.assignee_summary()
        );
    }
}

pub fn task_detail(task: &Task) {
    println!("{} (#{})", task.title, task.id);
    println!("  status:   {}", task.status);
    println!("  team:     {}", task.team);
    println!("  schedule: {} -> {}", task.start_date, task.deadline);
    println!("  assigned: {}", task.assigned_to.join(", "));
    if !task.description.is_empty() {
        println!("  {}", task.description);
    }
    for phase in TaskPhase::ALL {
        let marker = match task.phase_status(phase) {
            PhaseStatus::Completed => "x",
            PhaseStatus::Current => ">",
            PhaseStatus::Pending => " ",
        };
        println!("  [{marker}] {:<12} {}", phase.name(), phase.typical_duration());
    }
}

pub fn ticket_stats(stats: &TicketStats) {
    println!(
        "Total {}  Open {}  In progress {}  Resolved {}",
        stats.total, stats.open, stats.in_progress, stats.resolved
    );
}

pub fn tickets(items: &[&Ticket]) {
    if items.is_empty() {
        println!("No tickets");
        return;
    }
    for t in items {
        println!(
            "#{:<14} {:<12} {:<18} {:<24} {}  {}",
            t.id,
            t.status.as_str(),
            t.ticket_type,
            t.department,
            t.created_at,
            t.raised_by
        );
        if !t.description.is_empty() {
            println!("    {}", t.description);
        }
    }
}

pub fn feedback(items: &[&Feedback]) {
    if items.is_empty() {
        println!("No feedback yet");
        return;
    }
    for f in items {
        println!("#{} {} on {}", f.id, f.user_id, f.created_at);
        println!("    {}", f.content);
    }
}

pub fn employees(items: &[&Employee]) {
    if items.is_empty() {
        println!("No employees found");
        return;
    }
    for e in items {
        println!(
            "{:<3} {:<24} {:<28} {:<24} {}",
            e.initials(),
            e.name,
            e.position,
            e.department,
            e.email
        );
    }
}

pub fn employee_detail(employee: &Employee, today: NaiveDate) {
    println!("{} ({})", employee.name, employee.initials());
    println!("  position:   {}", employee.position);
    println!("  department: {}", employee.department);
    println!("  email:      {}", employee.email);
    if !employee.phone.is_empty() {
        println!("  phone:      {}", employee.phone);
    }
    if !employee.location.is_empty() {
        println!("  location:   {}", employee.location);
    }
    if !employee.manager.is_empty() {
        println!("  manager:    {}", employee.manager);
    }
    if let Some(tenure) = employee.tenure(today) {
        println!("  tenure:     {tenure}");
    }
    if !employee.skills.is_empty() {
        println!("  skills:     {}", employee.skills.join(", "));
    }
    if !employee.bio.is_empty() {
        println!("  {}", employee.bio);
    }
}

pub fn holidays(items: &[&Holiday]) {
    if items.is_empty() {
        println!("No holidays");
        return;
    }
    for h in items {
        println!("{:<28} {:<20} {}", h.name, h.long_date(), h.weekday_name());
    }
}

pub fn discussions(items: &[&Discussion]) {
    if items.is_empty() {
        println!("No discussions");
        return;
    }
    for d in items {
        println!(
            "#{:<14} [{}] {}  ({}, {}, {} comments)",
            d.id,
            d.discussion_type(),
            d.title,
            d.created_by,
            d.created_at,
            d.comments().len()
        );
    }
}

pub fn discussion_detail(
    discussion: &Discussion,
    reactions: &[ReactionSummary],
    tally: Option<&PollTally>,
    my_vote: Option<&str>,
) {
    println!("{} [{}]", discussion.title, discussion.discussion_type());
    println!("  by {} ({}) on {}", discussion.created_by, discussion.role, discussion.created_at);
    println!("  {}", discussion.content);

    if let Some(tally) = tally {
        println!("  Poll, {} responses:", tally.total_responses);
        for option in &tally.options {
            let mark = if my_vote == Some(option.option.as_str()) { "*" } else { " " };
            println!(
                "   {mark} {:<28} {:>3} ({}%)",
                option.option,
                option.count,
                option.rounded_percentage()
            );
        }
    }

    let line: Vec<String> = reactions
        .iter()
        .map(|r| {
            if r.mine {
                format!("[{} {}]", r.symbol, r.count)
            } else {
                format!("{} {}", r.symbol, r.count)
            }
        })
        .collect();
    println!("  {}", line.join("  "));

    for comment in discussion.comments() {
        println!(
            "  - {} ({}): {}",
            comment.employee_id,
            comment.timestamp.format("%Y-%m-%d %H:%M"),
            comment.message
        );
    }
}
