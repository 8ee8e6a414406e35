//! Built-in fallback data, substituted wholesale when a stored list is
//! missing or unreadable.

use crate::category::Category;
use crate::task::{Priority, Task};
use chrono::{DateTime, Duration, Utc};

pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("cat-1", "Work", "#ef4444"),
        Category::new("cat-2", "Personal", "#3b82f6"),
        Category::new("cat-3", "Shopping", "#f59e0b"),
        Category::new("cat-4", "Health", "#10b981"),
    ]
}

/// Five sample tasks with a mix of completion, priority, category and due
/// dates, anchored to `now`.
pub fn default_tasks(now: DateTime<Utc>) -> Vec<Task> {
    vec![
        Task::new("1", "Complete project proposal", now)
            .with_due_date(now + Duration::days(2))
            .with_category("cat-1")
            .with_priority(Priority::High),
        Task::new("2", "Go grocery shopping", now).with_category("cat-3"),
        Task::new("3", "Schedule doctor appointment", now)
            .with_due_date(now + Duration::days(7))
            .with_category("cat-4"),
        Task::new("4", "Read a chapter of your book", now - Duration::days(2))
            .with_category("cat-2")
            .with_priority(Priority::Low)
            .with_completed(true),
        Task::new("5", "Call mom", now)
            .with_category("cat-2")
            .with_priority(Priority::High),
    ]
}
