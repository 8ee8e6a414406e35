//! taskdeck-core: task and category domain logic for the taskdeck CLI

pub mod category;
pub mod category_store;
pub mod defaults;
pub mod filter;
pub mod stats;
pub mod task;
pub mod task_store;
pub mod time;

pub use category::{Category, resolve_category};
pub use category_store::CategoryStore;
pub use defaults::{default_categories, default_tasks};
pub use filter::{FilterState, StatusFilter, visible_tasks};
pub use stats::{CategoryCount, PriorityCounts, TaskStats, compute_stats};
pub use task::{Priority, Task};
pub use task_store::{TaskPatch, TaskStore, UpdateOutcome};
pub use time::parse_due_date;
