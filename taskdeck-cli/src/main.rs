use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use taskdeck_core::{
    CategoryStore, FilterState, Priority, StatusFilter, Task, TaskPatch, UpdateOutcome,
    compute_stats, parse_due_date, resolve_category, visible_tasks,
};

mod config;
mod state;
mod tui;

use config::load_config;
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about = "Local-first task manager")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a task
    Add {
        text: String,

        /// Due date: YYYY-MM-DD or "YYYY-MM-DD HH:MM" (local to ui.timezone)
        #[arg(long)]
        due: Option<String>,

        /// Category id or name
        #[arg(long)]
        category: Option<String>,

        /// low | medium | high (default: medium)
        #[arg(long)]
        priority: Option<Priority>,
    },

    /// List tasks through the filter pipeline
    List {
        /// all | active | completed
        #[arg(long)]
        status: Option<StatusFilter>,

        /// Case-insensitive substring match on task text
        #[arg(long)]
        search: Option<String>,

        /// Category id or name
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        priority: Option<Priority>,

        /// Max rows (default: ui.list_limit)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Toggle a task's completed flag
    Done { id: String },

    /// Edit fields of an existing task
    Edit {
        id: String,

        #[arg(long)]
        text: Option<String>,

        #[arg(long)]
        due: Option<String>,

        /// Remove the due date
        #[arg(long, default_value_t = false)]
        clear_due: bool,

        /// Category id or name
        #[arg(long)]
        category: Option<String>,

        /// Detach the task from its category
        #[arg(long, default_value_t = false)]
        clear_category: bool,

        #[arg(long)]
        priority: Option<Priority>,
    },

    /// Delete a task
    Rm { id: String },

    /// Delete every completed task
    ClearCompleted,

    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommand,
    },

    /// Show task statistics
    Stats,

    /// Write a default ~/.taskdeck/config.toml
    ConfigInit,

    /// Interactive list view
    Tui,
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    /// Add a category
    Add {
        name: String,

        /// Display color, e.g. "#6366f1"
        #[arg(long, default_value = "#6366f1")]
        color: String,
    },

    /// Delete a category (tasks keep their reference and show as uncategorized)
    Rm { id: String },

    /// List categories
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Command::ConfigInit = cli.command {
        return config::init_config();
    }

    let cfg = load_config()?;
    let mut app = AppState::load(cfg.storage.data_dir.clone())?;

    match cli.command {
        Command::ConfigInit => unreachable!("handled above"),

        Command::Add {
            text,
            due,
            category,
            priority,
        } => {
            let due_date = due
                .map(|d| parse_due_date(&d, &cfg.ui.timezone))
                .transpose()
                .context("parsing --due")?;
            let category_id =
                category.map(|arg| resolve_category_arg(&app.categories, &arg));

            match app.tasks.add(&text, Utc::now(), due_date, category_id, priority) {
                Some(task) => {
                    app.save_tasks()?;
                    println!("Added [{}] {}", task.id, task.text);
                }
                None => println!("Nothing added: task text is empty."),
            }
        }

        Command::List {
            status,
            search,
            category,
            priority,
            limit,
        } => {
            let filters = FilterState {
                status: status.unwrap_or_default(),
                search: search.unwrap_or_default(),
                category_id: category.map(|arg| resolve_category_arg(&app.categories, &arg)),
                priority,
            };
            let limit = limit.unwrap_or(cfg.ui.list_limit);

            let visible = visible_tasks(app.tasks.tasks(), &filters);
            if visible.is_empty() {
                println!("No tasks match.");
            }
            let now = Utc::now();
            for task in visible.iter().take(limit) {
                println!("{}", render_task_line(task, &app.categories, now, &cfg.ui.timezone));
            }
            if visible.len() > limit {
                println!("... and {} more (raise --limit)", visible.len() - limit);
            }
            if !filters.is_unfiltered() {
                println!(
                    "{} of {} task(s) shown.",
                    visible.len().min(limit),
                    app.tasks.len()
                );
            }
        }

        Command::Done { id } => {
            if app.tasks.toggle_complete(&id) {
                app.save_tasks()?;
                let task = app.tasks.get(&id).expect("just toggled");
                let state = if task.completed { "done" } else { "open" };
                println!("[{}] {} is now {state}", task.id, task.text);
            } else {
                println!("No task with id {id}.");
            }
        }

        Command::Edit {
            id,
            text,
            due,
            clear_due,
            category,
            clear_category,
            priority,
        } => {
            let due_date = if clear_due {
                Some(None)
            } else {
                due.map(|d| parse_due_date(&d, &cfg.ui.timezone))
                    .transpose()
                    .context("parsing --due")?
                    .map(Some)
            };
            let category_id = if clear_category {
                Some(None)
            } else {
                category.map(|arg| Some(resolve_category_arg(&app.categories, &arg)))
            };

            let patch = TaskPatch {
                text,
                due_date,
                category_id,
                priority,
                completed: None,
            };

            match app.tasks.update(&id, &patch) {
                UpdateOutcome::Applied => {
                    app.save_tasks()?;
                    println!("Updated [{id}]");
                }
                UpdateOutcome::RejectedEmptyText => {
                    println!("Not updated: task text cannot be empty.");
                }
                UpdateOutcome::NotFound => println!("No task with id {id}."),
            }
        }

        Command::Rm { id } => match app.tasks.remove(&id) {
            Some(task) => {
                app.save_tasks()?;
                println!("Removed [{}] {}", task.id, task.text);
            }
            None => println!("No task with id {id}."),
        },

        Command::ClearCompleted => {
            let removed = app.tasks.clear_completed();
            if removed > 0 {
                app.save_tasks()?;
            }
            println!("Removed {removed} completed task(s).");
        }

        Command::Category { command } => match command {
            CategoryCommand::Add { name, color } => {
                match app.categories.add(&name, &color, Utc::now()) {
                    Some(category) => {
                        app.save_categories()?;
                        println!("Added category [{}] {}", category.id, category.name);
                    }
                    None => println!("Nothing added: category name is empty."),
                }
            }
            CategoryCommand::Rm { id } => match app.categories.remove(&id) {
                Some(category) => {
                    app.save_categories()?;
                    println!(
                        "Removed category [{}] {}. Its tasks are kept and now show as uncategorized.",
                        category.id, category.name
                    );
                }
                None => println!("No category with id {id}."),
            },
            CategoryCommand::List => {
                if app.categories.is_empty() {
                    println!("No categories.");
                }
                for c in app.categories.categories() {
                    println!("[{}] {} ({})", c.id, c.name, c.color);
                }
            }
        },

        Command::Stats => {
            let stats = compute_stats(
                app.tasks.tasks(),
                app.categories.categories(),
                Utc::now(),
            );
            println!("Total:      {}", stats.total);
            println!("Completed:  {} ({}%)", stats.completed, stats.completion_rate);
            println!("Active:     {}", stats.active);
            println!("Overdue:    {}", stats.overdue);
            println!(
                "Priority:   high={} medium={} low={}",
                stats.by_priority.high, stats.by_priority.medium, stats.by_priority.low
            );
            if !stats.by_category.is_empty() {
                println!("By category:");
                for c in &stats.by_category {
                    println!("  {} — {}", c.name, c.count);
                }
            }
        }

        Command::Tui => {
            tui::run(&mut app, &cfg.ui.timezone)?;
        }
    }

    Ok(())
}

/// Accept either a category id or a (case-insensitive) name. Unknown values
/// pass through as-is: as a filter they match nothing, same as any stale id.
fn resolve_category_arg(categories: &CategoryStore, arg: &str) -> String {
    if categories.get(arg).is_some() {
        return arg.to_string();
    }
    categories
        .categories()
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(arg))
        .map(|c| c.id.clone())
        .unwrap_or_else(|| arg.to_string())
}

fn render_task_line(
    task: &Task,
    categories: &CategoryStore,
    now: chrono::DateTime<Utc>,
    tz: &str,
) -> String {
    let mark = if task.completed { "x" } else { " " };
    let category = resolve_category(categories.categories(), task.category_id.as_deref())
        .map(|c| c.name.as_str())
        .unwrap_or("-");

    let mut line = format!("[{mark}] {}  {}  ({}, {category}", task.id, task.text, task.priority);
    if let Some(due) = task.due_date {
        let local = tz
            .parse::<chrono_tz::Tz>()
            .map(|tz| due.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| due.format("%Y-%m-%d %H:%M").to_string());
        line.push_str(&format!(", due {local}"));
        if task.is_overdue(now) {
            line.push_str(", overdue");
        }
    }
    line.push(')');
    line
}
