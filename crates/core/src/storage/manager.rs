use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;

use crate::errors::CoreError;

use super::format;
use super::paths::{Collection, StorageConfig};

/// Durable storage of each collection as an independent JSON document.
///
/// Loads are infallible by design: a missing document is the first-run case
/// and a corrupt one must never crash app startup, so both come back as an
/// empty collection. Saves rewrite the whole document in one operation.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    config: StorageConfig,
}

impl DocumentStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Load a collection from its backing document.
    ///
    /// Missing file → empty (first run). Unreadable or undecodable file →
    /// logged and empty; prior data is not recoverable through this path.
    pub fn load<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        let path = self.config.document_path(collection);
        if !path.exists() {
            info!("{collection} not found, starting with an empty collection");
            return Vec::new();
        }

        let result = fs::read(&path)
            .map_err(CoreError::from)
            .and_then(|bytes| format::read_document(&bytes));

        match result {
            Ok(items) => {
                info!("loaded {} records from {collection}", items.len());
                items
            }
            Err(e) => {
                warn!("failed to load {collection}: {e} — treating as empty");
                Vec::new()
            }
        }
    }

    /// Serialize the entire collection and overwrite its backing document.
    pub fn save<T: Serialize>(&self, collection: Collection, items: &[T]) -> Result<(), CoreError> {
        let bytes = format::write_document(items)?;
        fs::create_dir_all(self.config.documents_dir())?;
        fs::write(self.config.document_path(collection), bytes)?;
        info!("saved {} records to {collection}", items.len());
        Ok(())
    }

    /// Best-effort removal of a collection's backing document.
    pub fn remove(&self, collection: Collection) {
        let _ = fs::remove_file(self.config.document_path(collection));
    }
}
