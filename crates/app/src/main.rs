//! Tecnics employee portal client
//!
//! Command-line front end over the portal pages. Each invocation mounts the
//! page it needs, runs one action and prints the result.

use std::future::Future;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use portal_core::{
    DiscussionType, NewAnnouncement, NewDiscussionForm, NewHoliday, NewTaskForm, NewTicket,
    PortalConfig, Priority, TaskStatus, TicketStatus,
};
use portal_net::CancelHandle;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;
mod state;
mod viewmodel;

use state::{AppState, Route};
use viewmodel::{
    action_error_message, AnnouncementsPage, DashboardPage, DiscussionsPage, EmployeesPage,
    FeedbackPage, HelpdeskPage, HolidaysPage, LoadState, LoginForm, PageError, TasksPage,
};

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Tecnics employee portal: announcements, tasks, help desk and more", version)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Forget the stored session token
    Logout,

    /// Show the current user
    Whoami,

    /// Latest announcements
    Dashboard,

    #[command(subcommand)]
    Announcements(AnnouncementsCommand),

    #[command(subcommand)]
    Tasks(TasksCommand),

    /// Help-desk tickets
    #[command(subcommand)]
    Tickets(TicketsCommand),

    #[command(subcommand)]
    Feedback(FeedbackCommand),

    #[command(subcommand)]
    Employees(EmployeesCommand),

    #[command(subcommand)]
    Holidays(HolidaysCommand),

    #[command(subcommand)]
    Discussions(DiscussionsCommand),
}

#[derive(Subcommand)]
enum AnnouncementsCommand {
    List {
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(long)]
        priority: Option<Priority>,
    },

    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        category: String,

        #[arg(long)]
        description: String,

        #[arg(long, default_value = "medium")]
        priority: Priority,
    },
}

#[derive(Subcommand)]
enum TasksCommand {
    List {
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(long)]
        team: Option<String>,

        #[arg(long)]
        status: Option<TaskStatus>,
    },

    /// Task details with its phase pipeline
    Show { id: String },

    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        #[arg(long, default_value = "medium")]
        priority: Priority,

        #[arg(long)]
        team: String,

        /// Repeat for each team member
        #[arg(long = "assignee", value_name = "NAME")]
        assignees: Vec<String>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        start: Option<NaiveDate>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        deadline: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
enum TicketsCommand {
    List {
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(long)]
        status: Option<TicketStatus>,

        #[arg(long = "type", value_name = "TYPE")]
        ticket_type: Option<String>,
    },

    Create {
        #[arg(long = "type", value_name = "TYPE")]
        ticket_type: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        department: String,
    },

    /// Change a ticket's status (not sent to the server)
    Status { id: String, status: TicketStatus },

    /// Remove a ticket from the list (not sent to the server)
    Delete { id: String },
}

#[derive(Subcommand)]
enum FeedbackCommand {
    List {
        #[arg(short, long, default_value = "")]
        search: String,
    },

    Submit { content: String },

    /// Rewrite an entry (not sent to the server)
    Edit { id: String, content: String },

    /// Remove an entry (not sent to the server)
    Delete { id: String },
}

#[derive(Subcommand)]
enum EmployeesCommand {
    List {
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(long)]
        department: Option<String>,
    },

    Show { id: String },
}

#[derive(Subcommand)]
enum HolidaysCommand {
    List {
        #[arg(short, long, default_value = "")]
        search: String,
    },

    Add {
        #[arg(long)]
        name: String,

        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
enum DiscussionsCommand {
    List {
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(long = "type", value_name = "TYPE")]
        discussion_type: Option<DiscussionType>,
    },

    Show { id: String },

    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        #[arg(long = "type", default_value = "forum")]
        discussion_type: DiscussionType,

        /// Poll choice; repeat for each option
        #[arg(long = "option", value_name = "TEXT")]
        options: Vec<String>,
    },

    React { id: String, symbol: String },

    Vote { id: String, option: String },

    Comment { id: String, message: String },
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(code) => code,
        Err(e) => {
            if e.needs_login() {
                eprintln!("Not signed in. Run `portal login --email <EMAIL> --password <PASSWORD>`.");
            }
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, PageError> {
    let config = PortalConfig::load(cli.config.as_deref())?;
    let app = AppState::new(config)?;
    info!(api = %app.config.api_base_url, "Starting portal");

    let json = cli.json;
    let command = match cli.command {
        Some(command) => command,
        None => match app.initial_route()? {
            Route::Login => {
                println!("Not signed in. Run `portal login --email <EMAIL> --password <PASSWORD>`.");
                return Ok(ExitCode::SUCCESS);
            }
            Route::Dashboard => Command::Dashboard,
        },
    };

    match command {
        Command::Login { email, password } => {
            let mut form = LoginForm::new(email, password);
            if form.submit(&app.api).await {
                println!("Signed in as {}", form.email.trim());
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("{}", form.error.unwrap_or_default());
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Logout => {
            app.api.logout()?;
            println!("Signed out");
            Ok(ExitCode::SUCCESS)
        }
        Command::Whoami => {
            if json {
                render::json(app.current_user())?;
            } else {
                render::user(app.current_user());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Dashboard => {
            let mut page = DashboardPage::new();
            load_interruptible(page.cancel_handle(), page.load(&app.api)).await;
            if !render::load_state(page.state()) {
                return Ok(ExitCode::FAILURE);
            }
            if json {
                render::json(page.feed())?;
            } else {
                println!("Welcome back, {}", app.current_user().name);
                let feed: Vec<_> = page.feed().iter().collect();
                render::announcements(&feed);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Announcements(command) => announcements(&app, command, json).await,
        Command::Tasks(command) => tasks(&app, command, json).await,
        Command::Tickets(command) => tickets(&app, command, json).await,
        Command::Feedback(command) => feedback(&app, command, json).await,
        Command::Employees(command) => employees(&app, command, json).await,
        Command::Holidays(command) => holidays(&app, command, json),
        Command::Discussions(command) => discussions(&app, command, json),
    }
}

/// Run a page load; Ctrl-C cancels the fetch and leaves the page unloaded
async fn load_interruptible<F>(handle: CancelHandle, load: F)
where
    F: Future<Output = ()>,
{
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });
    load.await;
    interrupt.abort();
}

/// Report a failed action the way the page would show it
fn action_failed(action: &str, err: PageError) -> Result<ExitCode, PageError> {
    if err.needs_login() {
        return Err(err);
    }
    eprintln!("{}", action_error_message(action, &err));
    Ok(ExitCode::FAILURE)
}

fn loaded(state: &LoadState) -> bool {
    render::load_state(state)
}

async fn announcements(
    app: &AppState,
    command: AnnouncementsCommand,
    json: bool,
) -> Result<ExitCode, PageError> {
    let mut page = AnnouncementsPage::new();
    load_interruptible(page.cancel_handle(), page.load(&app.api)).await;
    if !loaded(page.state()) {
        return Ok(ExitCode::FAILURE);
    }

    match command {
        AnnouncementsCommand::List { search, priority } => {
            page.filter.search = search;
            page.filter.priority = priority;
        }
        AnnouncementsCommand::Create {
            title,
            category,
            description,
            priority,
        } => {
            let user = app.current_user();
            let draft = NewAnnouncement {
                title,
                priority,
                category,
                author: user.name.clone(),
                department: user.department.clone(),
                date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
                description,
            };
            if let Err(e) = page.create(&app.api, user, draft).await {
                return action_failed("create announcement", e);
            }
            println!("Announcement published");
        }
    }

    let visible = page.visible();
    if json {
        render::json(&visible)?;
    } else {
        render::announcements(&visible);
    }
    Ok(ExitCode::SUCCESS)
}

async fn tasks(app: &AppState, command: TasksCommand, json: bool) -> Result<ExitCode, PageError> {
    let mut page = TasksPage::new();
    load_interruptible(page.cancel_handle(), page.load(&app.api)).await;
    if !loaded(page.state()) {
        return Ok(ExitCode::FAILURE);
    }

    match command {
        TasksCommand::List {
            search,
            team,
            status,
        } => {
            page.filter.search = search;
            page.filter.team = team;
            page.filter.status = status;
        }
        TasksCommand::Show { id } => {
            let Some(task) = page.task(&id) else {
                return action_failed("show task", PageError::Missing("task", id));
            };
            if json {
                render::json(task)?;
            } else {
                render::task_detail(task);
            }
            return Ok(ExitCode::SUCCESS);
        }
        TasksCommand::Create {
            title,
            description,
            priority,
            team,
            assignees,
            start,
            deadline,
        } => {
            let mut form = NewTaskForm {
                title,
                description,
                priority,
                start_date: start,
                deadline,
                ..Default::default()
            };
            form.set_team(&team);
            for member in &assignees {
                form.add_assignee(member);
            }
            if let Err(e) = page.create(&app.api, app.current_user(), &form).await {
                return action_failed("create task", e);
            }
            println!("Task created");
        }
    }

    let visible = page.visible();
    if json {
        render::json(&visible)?;
    } else {
        render::task_stats(&page.stats());
        render::tasks(&visible);
    }
    Ok(ExitCode::SUCCESS)
}

async fn tickets(
    app: &AppState,
    command: TicketsCommand,
    json: bool,
) -> Result<ExitCode, PageError> {
    let mut page = HelpdeskPage::new();
    load_interruptible(page.cancel_handle(), page.load(&app.api)).await;
    if !loaded(page.state()) {
        return Ok(ExitCode::FAILURE);
    }
    let user = app.current_user();

    match command {
        TicketsCommand::List {
            search,
            status,
            ticket_type,
        } => {
            page.filter.search = search;
            page.filter.status = status;
            page.filter.ticket_type = ticket_type;
        }
        TicketsCommand::Create {
            ticket_type,
            description,
            department,
        } => {
            let mut ticket = NewTicket::raised_by(&user.name);
            ticket.ticket_type = ticket_type;
            ticket.description = description;
            ticket.department = department;
            match page.create(&app.api, ticket).await {
                Ok(created) => println!("Ticket #{} raised", created.id),
                Err(e) => return action_failed("create ticket", e),
            }
        }
        TicketsCommand::Status { id, status } => {
            if let Err(e) = page.update_status(user, &id, status) {
                return action_failed("update ticket", e);
            }
        }
        TicketsCommand::Delete { id } => {
            if let Err(e) = page.delete(user, &id) {
                return action_failed("delete ticket", e);
            }
        }
    }

    let visible = page.visible();
    if json {
        render::json(&visible)?;
    } else {
        render::ticket_stats(&page.stats());
        render::tickets(&visible);
    }
    Ok(ExitCode::SUCCESS)
}

async fn feedback(
    app: &AppState,
    command: FeedbackCommand,
    json: bool,
) -> Result<ExitCode, PageError> {
    let mut page = FeedbackPage::new();
    load_interruptible(page.cancel_handle(), page.load(&app.api)).await;
    if !loaded(page.state()) {
        return Ok(ExitCode::FAILURE);
    }
    let user = app.current_user();

    match command {
        FeedbackCommand::List { search } => page.filter.search = search,
        FeedbackCommand::Submit { content } => {
            if let Err(e) = page.submit(&app.api, user, &content).await {
                return action_failed("submit feedback", e);
            }
            println!("Thank you for your feedback");
        }
        FeedbackCommand::Edit { id, content } => {
            if let Err(e) = page.edit(user, &id, &content) {
                return action_failed("edit feedback", e);
            }
        }
        FeedbackCommand::Delete { id } => {
            if let Err(e) = page.delete(user, &id) {
                return action_failed("delete feedback", e);
            }
        }
    }

    let visible = page.visible();
    if json {
        render::json(&visible)?;
    } else {
        render::feedback(&visible);
    }
    Ok(ExitCode::SUCCESS)
}

async fn employees(
    app: &AppState,
    command: EmployeesCommand,
    json: bool,
) -> Result<ExitCode, PageError> {
    let mut page = EmployeesPage::new();
    load_interruptible(page.cancel_handle(), page.load(&app.api)).await;
    if !loaded(page.state()) {
        return Ok(ExitCode::FAILURE);
    }

    match command {
        EmployeesCommand::List { search, department } => {
            page.filter.search = search;
            page.filter.department = department;
            let directory = page.directory();
            if json {
                render::json(&directory)?;
            } else {
                println!("Departments: {}", page.departments().join(", "));
                render::employees(&directory);
            }
        }
        EmployeesCommand::Show { id } => {
            let Some(employee) = page.employee(&id) else {
                return action_failed("show employee", PageError::Missing("employee", id));
            };
            if json {
                render::json(employee)?;
            } else {
                render::employee_detail(employee, Local::now().date_naive());
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn holidays(app: &AppState, command: HolidaysCommand, json: bool) -> Result<ExitCode, PageError> {
    let mut page = HolidaysPage::mount();

    match command {
        HolidaysCommand::List { search } => page.filter.search = search,
        HolidaysCommand::Add { name, date } => {
            let draft = NewHoliday { name, date };
            if let Err(e) = page.add(app.current_user(), &draft) {
                return action_failed("add holiday", e);
            }
        }
    }

    let visible = page.visible();
    if json {
        render::json(&visible)?;
    } else {
        render::holidays(&visible);
    }
    Ok(ExitCode::SUCCESS)
}

fn discussions(
    app: &AppState,
    command: DiscussionsCommand,
    json: bool,
) -> Result<ExitCode, PageError> {
    let mut page = DiscussionsPage::mount(app.current_user().clone());

    let shown = match command {
        DiscussionsCommand::List {
            search,
            discussion_type,
        } => {
            page.filter.search = search;
            page.filter.discussion_type = discussion_type;
            let visible = page.visible();
            if json {
                render::json(&visible)?;
            } else {
                render::discussions(&visible);
            }
            return Ok(ExitCode::SUCCESS);
        }
        DiscussionsCommand::Show { id } => id,
        DiscussionsCommand::Create {
            title,
            content,
            discussion_type,
            options,
        } => {
            let form = NewDiscussionForm {
                title,
                content,
                discussion_type,
                options,
            };
            match page.create(&form) {
                Ok(created) => created.id.clone(),
                Err(e) => return action_failed("create discussion", e),
            }
        }
        DiscussionsCommand::React { id, symbol } => {
            page.react(&id, &symbol);
            id
        }
        DiscussionsCommand::Vote { id, option } => {
            page.vote(&id, &option);
            id
        }
        DiscussionsCommand::Comment { id, message } => {
            page.comment(&id, &message);
            id
        }
    };

    let Some(discussion) = page.discussion(&shown) else {
        return action_failed("show discussion", PageError::Missing("discussion", shown));
    };
    if json {
        render::json(discussion)?;
    } else {
        render::discussion_detail(
            discussion,
            &page.reactions(discussion),
            page.tally(discussion).as_ref(),
            page.my_vote(discussion),
        );
    }
    Ok(ExitCode::SUCCESS)
}
