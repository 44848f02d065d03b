use std::fs;
use std::path::PathBuf;

use crate::errors::CoreError;

/// Minimal key-value store over a shared directory, the export target of
/// the widget snapshot. Each key maps to `<dir>/<key>.json`.
///
/// This is a one-way channel: the core only writes; an independent second
/// process polls and decodes the value on its own cadence.
#[derive(Debug, Clone)]
pub struct SharedStore {
    dir: PathBuf,
}

impl SharedStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Overwrite the value stored under `key`.
    pub fn set(&self, key: &str, value: &[u8]) -> Result<(), CoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(format!("{key}.json")), value)?;
        Ok(())
    }

    /// Read the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        fs::read(self.dir.join(format!("{key}.json"))).ok()
    }
}
