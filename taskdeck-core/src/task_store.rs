//! TaskStore — ordered, most-recent-first task collection.
//!
//! Mutations never error: invalid input (empty text) and unknown ids are
//! explicit no-op outcomes so callers and tests can assert on rejection
//! instead of diffing the list. Persistence is the caller's job; the store
//! only reports whether anything changed.

use crate::task::{Priority, Task};
use chrono::{DateTime, Utc};

/// Result of [`TaskStore::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    /// Patch text was empty after trimming; nothing changed.
    RejectedEmptyText,
    NotFound,
}

/// Partial update for a task. `None` leaves a field alone; the nested
/// options on `due_date`/`category_id` distinguish "set" from "clear".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub category_id: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
}

#[derive(Debug, Default, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Create a task and prepend it (most-recent-first ordering).
    ///
    /// Returns `None` when `text` trims to empty. `created_at` is `now`;
    /// priority defaults to medium when unspecified.
    pub fn add(
        &mut self,
        text: &str,
        now: DateTime<Utc>,
        due_date: Option<DateTime<Utc>>,
        category_id: Option<String>,
        priority: Option<Priority>,
    ) -> Option<Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let mut task = Task::new(self.fresh_id(now), text, now)
            .with_priority(priority.unwrap_or_default());
        task.due_date = due_date;
        task.category_id = category_id;

        self.tasks.insert(0, task.clone());
        Some(task)
    }

    /// Merge `patch` into the matching task. `id` and `created_at` are
    /// never altered.
    pub fn update(&mut self, id: &str, patch: &TaskPatch) -> UpdateOutcome {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return UpdateOutcome::NotFound;
        };

        // Validate before touching anything so a rejected patch is a full no-op.
        let new_text = match &patch.text {
            Some(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return UpdateOutcome::RejectedEmptyText;
                }
                Some(trimmed.to_string())
            }
            None => None,
        };

        if let Some(text) = new_text {
            task.text = text;
        }
        if let Some(due_date) = &patch.due_date {
            task.due_date = *due_date;
        }
        if let Some(category_id) = &patch.category_id {
            task.category_id = category_id.clone();
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }

        UpdateOutcome::Applied
    }

    /// Flip `completed`; false when the id is unknown.
    pub fn toggle_complete(&mut self, id: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(pos))
    }

    /// Drop every completed task, keeping the rest in order. Returns the
    /// removed count.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        before - self.tasks.len()
    }

    // Millisecond timestamp, bumped with a suffix until unique. Keeps ids
    // compatible with the Date.now()-style ids in existing tasks.json files.
    fn fresh_id(&self, now: DateTime<Utc>) -> String {
        let base = now.timestamp_millis();
        let mut candidate = base.to_string();
        let mut bump = 0u32;
        while self.tasks.iter().any(|t| t.id == candidate) {
            bump += 1;
            candidate = format!("{base}-{bump}");
        }
        candidate
    }
}
