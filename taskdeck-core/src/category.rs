//! Category model: a user-defined label with a display color.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Opaque to the core; the UI layer renders it.
    pub color: String,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Look up a task's category reference.
///
/// An absent id and a stale id (category since deleted) both come back as
/// `None`; consumers render either as "no category".
pub fn resolve_category<'a>(categories: &'a [Category], id: Option<&str>) -> Option<&'a Category> {
    let id = id?;
    categories.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_and_absent_references_resolve_to_none() {
        let cats = vec![Category::new("c1", "Work", "#ef4444")];
        assert_eq!(resolve_category(&cats, Some("c1")).unwrap().name, "Work");
        assert!(resolve_category(&cats, Some("c9")).is_none());
        assert!(resolve_category(&cats, None).is_none());
    }
}
