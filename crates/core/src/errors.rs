use thiserror::Error;

/// Unified error type for the expense-tracker-core storage layer.
///
/// Errors never cross the `ExpenseDataManager` mutation boundary: the
/// manager logs and swallows them so callers never need error handling
/// around mutations. They are the internal currency of the `storage` module.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage / Document format ───────────────────────────────────
    #[error("Invalid document format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported document schema version: {0}")]
    UnsupportedVersion(u32),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── File I/O ────────────────────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
