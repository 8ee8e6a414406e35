//! CategoryStore — the label collection referenced by tasks.
//!
//! Deleting a category never cascades into the task list: any task still
//! pointing at the removed id simply reads as uncategorized from then on.

use crate::category::Category;
use chrono::{DateTime, Utc};

#[derive(Debug, Default, Clone)]
pub struct CategoryStore {
    categories: Vec<Category>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Create a category; `None` when `name` trims to empty.
    pub fn add(&mut self, name: &str, color: &str, now: DateTime<Utc>) -> Option<Category> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let category = Category::new(self.fresh_id(now), name, color);
        self.categories.push(category.clone());
        Some(category)
    }

    pub fn remove(&mut self, id: &str) -> Option<Category> {
        let pos = self.categories.iter().position(|c| c.id == id)?;
        Some(self.categories.remove(pos))
    }

    fn fresh_id(&self, now: DateTime<Utc>) -> String {
        let base = now.timestamp_millis();
        let mut candidate = format!("cat-{base}");
        let mut bump = 0u32;
        while self.categories.iter().any(|c| c.id == candidate) {
            bump += 1;
            candidate = format!("cat-{base}-{bump}");
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_trims_name_and_assigns_unique_ids() {
        let mut s = CategoryStore::new();
        let at = Utc::now();
        let a = s.add("  Work ", "#ef4444", at).unwrap();
        let b = s.add("Home", "#3b82f6", at).unwrap();

        assert_eq!(a.name, "Work");
        assert_ne!(a.id, b.id);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn add_rejects_empty_name() {
        let mut s = CategoryStore::new();
        assert!(s.add("   ", "#fff", Utc::now()).is_none());
        assert!(s.is_empty());
    }

    #[test]
    fn remove_unknown_id_is_a_noop() {
        let mut s = CategoryStore::new();
        s.add("Work", "#ef4444", Utc::now()).unwrap();
        assert!(s.remove("cat-unknown").is_none());
        assert_eq!(s.len(), 1);
    }
}
