use crate::models::checklist::ChecklistItem;

/// Manages a checklist collection. The shopping and todo lists share this
/// logic but are passed in separately — they are never merged.
pub struct ChecklistService;

impl ChecklistService {
    pub fn new() -> Self {
        Self
    }

    /// Add a new incomplete item by name, returning its id.
    pub fn add(&self, items: &mut Vec<ChecklistItem>, name: impl Into<String>) -> String {
        let item = ChecklistItem::new(name);
        let id = item.id.clone();
        items.push(item);
        id
    }

    /// Replace the item with a matching id (rename and/or toggle).
    /// Unknown ids are no-ops.
    pub fn update(&self, items: &mut [ChecklistItem], item: ChecklistItem) -> bool {
        match items.iter().position(|i| i.id == item.id) {
            Some(idx) => {
                items[idx] = item;
                true
            }
            None => false,
        }
    }

    /// Remove items by index set; out-of-range indices are ignored.
    /// Returns the number of removed items.
    pub fn remove_at(&self, items: &mut Vec<ChecklistItem>, indices: &[usize]) -> usize {
        let mut sorted: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < items.len())
            .collect();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();

        for i in &sorted {
            items.remove(*i);
        }
        sorted.len()
    }
}

impl Default for ChecklistService {
    fn default() -> Self {
        Self::new()
    }
}
