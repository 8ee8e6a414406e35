//! Derived statistics over the task list.
//!
//! Pure recomputations for display; never persisted and never authoritative.

use crate::category::Category;
use crate::task::{Priority, Task};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub id: String,
    pub name: String,
    pub color: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    /// Percentage 0..=100, rounded; 0 for an empty list.
    pub completion_rate: u32,
    /// Open tasks whose due date is strictly before `now`.
    pub overdue: usize,
    pub by_priority: PriorityCounts,
    /// Counts per known category; zero-count entries omitted. Stale task
    /// references count toward no category at all.
    pub by_category: Vec<CategoryCount>,
}

pub fn compute_stats(tasks: &[Task], categories: &[Category], now: DateTime<Utc>) -> TaskStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let active = total - completed;

    let completion_rate = if total > 0 {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    };

    let overdue = tasks.iter().filter(|t| t.is_overdue(now)).count();

    let mut by_priority = PriorityCounts::default();
    for t in tasks {
        match t.priority {
            Priority::Low => by_priority.low += 1,
            Priority::Medium => by_priority.medium += 1,
            Priority::High => by_priority.high += 1,
        }
    }

    let by_category = categories
        .iter()
        .map(|c| CategoryCount {
            id: c.id.clone(),
            name: c.name.clone(),
            color: c.color.clone(),
            count: tasks
                .iter()
                .filter(|t| t.category_id.as_deref() == Some(c.id.as_str()))
                .count(),
        })
        .filter(|c| c.count > 0)
        .collect();

    TaskStats {
        total,
        completed,
        active,
        completion_rate,
        overdue,
        by_priority,
        by_category,
    }
}
