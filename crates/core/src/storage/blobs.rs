use log::info;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use crate::errors::CoreError;

use super::paths::StorageConfig;

/// Opaque blob storage for attached photos.
///
/// Blob identity is a randomly generated filename assigned at save time;
/// the data manager tracks references and cascades deletion when the
/// referencing transaction goes away.
#[derive(Debug, Clone)]
pub struct BlobStore {
    dir: PathBuf,
}

impl BlobStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            dir: config.blob_dir(),
        }
    }

    /// Write a blob and return its generated filename.
    /// The blob directory is created lazily on first write.
    pub fn save(&self, data: &[u8]) -> Result<String, CoreError> {
        fs::create_dir_all(&self.dir)?;
        let filename = format!("{}.jpg", Uuid::new_v4());
        fs::write(self.dir.join(&filename), data)?;
        info!("saved blob {filename} ({} bytes)", data.len());
        Ok(filename)
    }

    /// Read a blob back, or `None` if it does not exist.
    #[must_use]
    pub fn load(&self, filename: &str) -> Option<Vec<u8>> {
        fs::read(self.dir.join(filename)).ok()
    }

    /// Best-effort blob removal.
    pub fn delete(&self, filename: &str) {
        let _ = fs::remove_file(self.dir.join(filename));
    }
}
