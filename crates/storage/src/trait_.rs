//! Job card store abstraction.

use async_trait::async_trait;
use depot_core::{JobCard, JobCardFilter, JobCardId};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Provider of job cards.
///
/// Consumers such as the reliability reporter are handed a store rather than
/// reaching for shared global data.
#[async_trait]
pub trait JobCardStore: Send + Sync {
    /// Save a job card (create or update).
    async fn save_job_card(&mut self, card: &JobCard) -> Result<()>;

    /// Load a job card by ID.
    async fn load_job_card(&self, id: JobCardId) -> Result<Option<JobCard>>;

    /// List job cards matching the filter.
    async fn list_job_cards(&self, filter: &JobCardFilter) -> Result<Vec<JobCard>>;

    /// Delete a job card. Deleting a missing card is not an error.
    async fn delete_job_card(&mut self, id: JobCardId) -> Result<()>;
}
