use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named, completable entry shared by the shopping and todo lists.
///
/// The two lists are structurally identical but stored and persisted
/// independently; they are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub name: String,
    pub is_completed: bool,
}

impl ChecklistItem {
    /// New items start incomplete.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            is_completed: false,
        }
    }
}
