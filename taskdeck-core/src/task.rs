//! Task model for the taskdeck domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        f.write_str(s)
    }
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => anyhow::bail!("unknown priority '{other}' (expected low|medium|high)"),
        }
    }
}

/// A single to-do entry.
///
/// Serialized field names stay camelCase so existing `tasks.json` files from
/// the browser build load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,

    #[serde(default)]
    pub completed: bool,

    /// Set once at creation, never reassigned.
    pub created_at: DateTime<Utc>,

    /// Absent means "no deadline".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    /// Soft reference to a [`crate::Category`]. A dangling id is the defined
    /// "uncategorized" state, never an error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,

    #[serde(default)]
    pub priority: Priority,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
            created_at,
            due_date: None,
            category_id: None,
            priority: Priority::Medium,
        }
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Due strictly before `now` and still open.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date.is_some_and(|d| d < now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn serializes_with_browser_field_names() {
        let now = Utc::now();
        let t = Task::new("42", "Buy milk", now)
            .with_category("cat-3")
            .with_priority(Priority::High);

        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["categoryId"], "cat-3");
        assert_eq!(json["priority"], "high");
        assert!(json.get("createdAt").is_some());
        // absent dueDate is omitted, not null
        assert!(json.get("dueDate").is_none());
    }

    #[test]
    fn deserializes_minimal_record_with_defaults() {
        let json = r#"{"id":"1","text":"x","createdAt":"2026-08-01T00:00:00Z"}"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert!(!t.completed);
        assert_eq!(t.priority, Priority::Medium);
        assert!(t.due_date.is_none());
        assert!(t.category_id.is_none());
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" medium ".parse::<Priority>().unwrap(), Priority::Medium);
        assert!("lowValue".parse::<Priority>().is_err());
    }

    #[test]
    fn overdue_requires_open_task_and_past_deadline() {
        let now = Utc::now();
        let t = Task::new("1", "late", now).with_due_date(now - Duration::days(1));
        assert!(t.is_overdue(now));
        assert!(!t.clone().with_completed(true).is_overdue(now));
        let future = Task::new("2", "later", now).with_due_date(now + Duration::hours(1));
        assert!(!future.is_overdue(now));
    }
}
