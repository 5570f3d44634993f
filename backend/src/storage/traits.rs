//! # Storage Traits
//!
//! Storage abstraction for the medication collection. The domain layer works
//! against these traits so the concrete blob format can change without
//! touching business logic.

use crate::domain::models::Medication;

/// Failure while reading or writing the persisted collection
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Storage I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode medication collection: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Failed to decode medication collection: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("Invalid stored record: {0}")]
    InvalidRecord(String),
}

/// Interface for medication collection storage.
///
/// The collection persists as one unit: every save rewrites the whole blob,
/// and loads return the whole collection. There is no partial persistence
/// and no versioning.
pub trait MedicationStorage: Send + Sync {
    /// Load the full persisted collection. A store with no data yet returns
    /// an empty collection, not an error.
    fn load_medications(&self) -> Result<Vec<Medication>, PersistenceError>;

    /// Persist the full collection, replacing whatever was stored before
    fn save_medications(&self, medications: &[Medication]) -> Result<(), PersistenceError>;
}
