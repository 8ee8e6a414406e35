//! The derivation pipeline: raw tasks × active criteria → visible tasks.
//!
//! Criteria are conjunctive, pure and total; the output is always a
//! subsequence of the input, so list order (most-recent-first) survives
//! filtering untouched.

use crate::task::{Priority, Task};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
        };
        f.write_str(s)
    }
}

impl FromStr for StatusFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" | "done" => Ok(StatusFilter::Completed),
            other => anyhow::bail!("unknown status '{other}' (expected all|active|completed)"),
        }
    }
}

/// Fixed-shape filter record. `Default` is the identity filter: every task
/// passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub status: StatusFilter,
    /// Case-insensitive substring match against task text; empty = unset.
    pub search: String,
    /// Exact id match. A stale id matches nothing, so filtering by a
    /// deleted category yields an empty view.
    pub category_id: Option<String>,
    pub priority: Option<Priority>,
}

impl FilterState {
    pub fn is_unfiltered(&self) -> bool {
        self.status == StatusFilter::All
            && self.search.is_empty()
            && self.category_id.is_none()
            && self.priority.is_none()
    }

    pub fn cycle_status(&mut self) {
        self.status = match self.status {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        };
    }
}

/// Project the visible task set. Cheapest predicates run first; the result
/// is the same in any order since all predicates are pure.
pub fn visible_tasks<'a>(tasks: &'a [Task], filters: &FilterState) -> Vec<&'a Task> {
    let needle = filters.search.to_lowercase();

    tasks
        .iter()
        .filter(|t| {
            let status_ok = match filters.status {
                StatusFilter::All => true,
                StatusFilter::Active => !t.completed,
                StatusFilter::Completed => t.completed,
            };
            if !status_ok {
                return false;
            }
            if let Some(priority) = filters.priority {
                if t.priority != priority {
                    return false;
                }
            }
            if let Some(category_id) = &filters.category_id {
                if t.category_id.as_deref() != Some(category_id.as_str()) {
                    return false;
                }
            }
            if !needle.is_empty() && !t.text.to_lowercase().contains(&needle) {
                return false;
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(id: &str, text: &str) -> Task {
        Task::new(id, text, Utc::now())
    }

    fn tasks() -> Vec<Task> {
        vec![
            task("1", "Buy Milk Today").with_category("c1"),
            task("2", "Buy eggs").with_priority(Priority::High),
            task("3", "Walk the dog").with_completed(true),
        ]
    }

    #[test]
    fn unfiltered_is_identity() {
        let ts = tasks();
        let out = visible_tasks(&ts, &FilterState::default());
        assert_eq!(out.len(), ts.len());
        let ids: Vec<&str> = out.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let ts = tasks();
        let f = FilterState {
            search: "milk".into(),
            ..Default::default()
        };
        let out = visible_tasks(&ts, &f);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "Buy Milk Today");

        let f = FilterState {
            search: "MILK".into(),
            ..Default::default()
        };
        assert_eq!(visible_tasks(&ts, &f).len(), 1);
    }

    #[test]
    fn status_filter_splits_on_completed_only() {
        let ts = tasks();
        let active = FilterState {
            status: StatusFilter::Active,
            ..Default::default()
        };
        assert_eq!(visible_tasks(&ts, &active).len(), 2);

        let done = FilterState {
            status: StatusFilter::Completed,
            ..Default::default()
        };
        let out = visible_tasks(&ts, &done);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "3");
    }

    #[test]
    fn category_filter_requires_exact_match() {
        let ts = tasks();
        let f = FilterState {
            category_id: Some("c1".into()),
            ..Default::default()
        };
        assert_eq!(visible_tasks(&ts, &f).len(), 1);

        // A stale/deleted id never matches a concrete filter value.
        let stale = FilterState {
            category_id: Some("gone".into()),
            ..Default::default()
        };
        assert!(visible_tasks(&ts, &stale).is_empty());
    }

    #[test]
    fn conjunctive_criteria_all_must_pass() {
        let ts = tasks();
        let f = FilterState {
            status: StatusFilter::Active,
            search: "buy".into(),
            priority: Some(Priority::High),
            ..Default::default()
        };
        let out = visible_tasks(&ts, &f);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "2");
    }

    #[test]
    fn empty_input_never_panics() {
        let f = FilterState {
            status: StatusFilter::Completed,
            search: "anything".into(),
            category_id: Some("c9".into()),
            priority: Some(Priority::Low),
        };
        assert!(visible_tasks(&[], &f).is_empty());
    }

    #[test]
    fn output_preserves_relative_order() {
        let ts = vec![
            task("1", "alpha one"),
            task("2", "beta"),
            task("3", "alpha two"),
        ];
        let f = FilterState {
            search: "alpha".into(),
            ..Default::default()
        };
        let ids: Vec<&str> = visible_tasks(&ts, &f).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn status_cycles_through_all_three() {
        let mut f = FilterState::default();
        f.cycle_status();
        assert_eq!(f.status, StatusFilter::Active);
        f.cycle_status();
        assert_eq!(f.status, StatusFilter::Completed);
        f.cycle_status();
        assert_eq!(f.status, StatusFilter::All);
    }
}
