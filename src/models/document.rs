use serde::{Deserialize, Serialize};

use crate::models::TabSet;

/// The whole persisted unit for one workspace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub tab_sets: Vec<TabSet>,
    /// Ids of favorite sets. Kept in step with `TabSet::is_favorite` on every write;
    /// queries read the flag, not this list.
    #[serde(default)]
    pub favorites: Vec<String>,
}

impl Document {
    pub fn find(&self, id: &str) -> Option<&TabSet> {
        self.tab_sets.iter().find(|s| s.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut TabSet> {
        self.tab_sets.iter_mut().find(|s| s.id == id)
    }

    pub fn mark_favorite(&mut self, id: &str) {
        if !self.favorites.iter().any(|f| f == id) {
            self.favorites.push(id.to_string());
        }
    }

    pub fn unmark_favorite(&mut self, id: &str) {
        self.favorites.retain(|f| f != id);
    }

    /// Removes the set and its favorites entry. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tab_sets.len() + self.favorites.len();
        self.tab_sets.retain(|s| s.id != id);
        self.unmark_favorite(id);
        before != self.tab_sets.len() + self.favorites.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTabSet;

    #[test]
    fn favorites_are_not_duplicated() {
        let mut doc = Document::default();
        doc.mark_favorite("a");
        doc.mark_favorite("a");
        assert_eq!(doc.favorites, vec!["a".to_string()]);
        doc.unmark_favorite("a");
        assert!(doc.favorites.is_empty());
    }

    #[test]
    fn remove_reports_changes() {
        let mut doc = Document::default();
        let set = TabSet::new(NewTabSet {
            name: "x".into(),
            ..Default::default()
        });
        let id = set.id.clone();
        doc.tab_sets.push(set);
        doc.mark_favorite(&id);

        assert!(doc.remove(&id));
        assert!(doc.tab_sets.is_empty());
        assert!(doc.favorites.is_empty());
        assert!(!doc.remove(&id));
    }

    #[test]
    fn missing_fields_read_as_empty() {
        let doc: Document = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, Document::default());
    }
}
