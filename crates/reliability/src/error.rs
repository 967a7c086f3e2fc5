//! Reliability reporting errors.

/// Result alias for reporting operations.
pub type Result<T> = std::result::Result<T, ReliabilityError>;

/// Errors from report generation. The metric functions themselves never fail.
#[derive(Debug, thiserror::Error)]
pub enum ReliabilityError {
    /// Loading job cards failed
    #[error("storage error: {0}")]
    Storage(#[from] depot_storage::StorageError),

    /// Invalid model input, such as bad fleet figures
    #[error(transparent)]
    Core(#[from] depot_core::CoreError),
}
