//! Persistence adapter: two independently keyed JSON files under the
//! taskdeck home directory.
//!
//! Load failures never propagate: a missing file means "first run" and a
//! corrupt file is replaced wholesale by the built-in defaults, with a
//! warning on stderr. Saves happen only after a successful mutation, so
//! startup can never clobber stored data with an empty list.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use taskdeck_core::{Category, CategoryStore, Task, TaskStore, default_categories, default_tasks};

pub fn taskdeck_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".taskdeck"))
}

pub fn ensure_taskdeck_home() -> Result<PathBuf> {
    let dir = taskdeck_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn tasks_path(dir: &Path) -> PathBuf {
    dir.join("tasks.json")
}

pub fn categories_path(dir: &Path) -> PathBuf {
    dir.join("categories.json")
}

enum Stored<T> {
    Loaded(T),
    Missing,
    Unreadable(anyhow::Error),
}

fn read_list<T: DeserializeOwned>(path: &Path) -> Stored<Vec<T>> {
    if !path.exists() {
        return Stored::Missing;
    }
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => return Stored::Unreadable(e.into()),
    };
    match serde_json::from_str(&raw) {
        Ok(items) => Stored::Loaded(items),
        Err(e) => Stored::Unreadable(e.into()),
    }
}

fn write_list<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(items).context("serialize list")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))
}

pub fn load_tasks(dir: &Path) -> Vec<Task> {
    let path = tasks_path(dir);
    match read_list(&path) {
        Stored::Loaded(tasks) => tasks,
        Stored::Missing => default_tasks(Utc::now()),
        Stored::Unreadable(err) => {
            eprintln!(
                "warning: could not read {}: {err}; starting from default tasks",
                path.display()
            );
            default_tasks(Utc::now())
        }
    }
}

pub fn load_categories(dir: &Path) -> Vec<Category> {
    let path = categories_path(dir);
    match read_list(&path) {
        Stored::Loaded(categories) => categories,
        Stored::Missing => default_categories(),
        Stored::Unreadable(err) => {
            eprintln!(
                "warning: could not read {}: {err}; starting from default categories",
                path.display()
            );
            default_categories()
        }
    }
}

pub fn save_tasks(dir: &Path, tasks: &[Task]) -> Result<()> {
    write_list(&tasks_path(dir), tasks)
}

pub fn save_categories(dir: &Path, categories: &[Category]) -> Result<()> {
    write_list(&categories_path(dir), categories)
}

/// In-memory stores plus the directory they were loaded from.
pub struct AppState {
    home: PathBuf,
    pub tasks: TaskStore,
    pub categories: CategoryStore,
}

impl AppState {
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let home = match data_dir {
            Some(dir) => {
                fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
                dir
            }
            None => ensure_taskdeck_home()?,
        };
        let tasks = TaskStore::from_tasks(load_tasks(&home));
        let categories = CategoryStore::from_categories(load_categories(&home));
        Ok(Self {
            home,
            tasks,
            categories,
        })
    }

    pub fn save_tasks(&self) -> Result<()> {
        save_tasks(&self.home, self.tasks.tasks())
    }

    pub fn save_categories(&self) -> Result<()> {
        save_categories(&self.home, self.categories.categories())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "taskdeck-state-{label}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let dir = scratch_dir("missing");
        assert_eq!(load_tasks(&dir).len(), default_tasks(Utc::now()).len());
        assert_eq!(load_categories(&dir), default_categories());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_files_fall_back_to_defaults() {
        let dir = scratch_dir("corrupt");
        fs::write(tasks_path(&dir), "{not json").unwrap();
        fs::write(categories_path(&dir), "[{\"id\": 7}]").unwrap();

        assert_eq!(load_tasks(&dir).len(), default_tasks(Utc::now()).len());
        assert_eq!(load_categories(&dir), default_categories());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn saved_lists_load_back_unchanged() {
        let dir = scratch_dir("roundtrip");
        let now = Utc::now();

        let mut tasks = TaskStore::new();
        tasks
            .add("persisted", now, Some(now), Some("cat-1".into()), None)
            .unwrap();
        let mut categories = CategoryStore::new();
        categories.add("Errands", "#f59e0b", now).unwrap();

        save_tasks(&dir, tasks.tasks()).unwrap();
        save_categories(&dir, categories.categories()).unwrap();

        assert_eq!(load_tasks(&dir), tasks.tasks());
        assert_eq!(load_categories(&dir), categories.categories());
        let _ = fs::remove_dir_all(&dir);
    }
}
