use std::path::{Path, PathBuf};

/// Subdirectory of the documents directory holding photo blobs.
pub const BLOB_DIR_NAME: &str = "ExpenseImages";

/// The five persisted collections, each backed by its own JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Transactions,
    Categories,
    Budgets,
    ShoppingItems,
    TodoItems,
}

impl Collection {
    /// Fixed document filename for this collection.
    #[must_use]
    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Transactions => "expenses.json",
            Collection::Categories => "categories.json",
            Collection::Budgets => "budgets.json",
            Collection::ShoppingItems => "shopping.json",
            Collection::TodoItems => "todo.json",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

/// All storage locations, resolved once at construction and injected into
/// the stores — never recomputed per access.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Application-private documents directory holding the five documents
    /// and the blob subdirectory
    pub documents_dir: PathBuf,

    /// Shared directory the widget snapshot is exported to, read by an
    /// independent second process
    pub shared_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(documents_dir: impl Into<PathBuf>, shared_dir: impl Into<PathBuf>) -> Self {
        Self {
            documents_dir: documents_dir.into(),
            shared_dir: shared_dir.into(),
        }
    }

    /// Full path of a collection's backing document.
    #[must_use]
    pub fn document_path(&self, collection: Collection) -> PathBuf {
        self.documents_dir.join(collection.file_name())
    }

    /// Directory holding photo blobs.
    #[must_use]
    pub fn blob_dir(&self) -> PathBuf {
        self.documents_dir.join(BLOB_DIR_NAME)
    }

    #[must_use]
    pub fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }
}
