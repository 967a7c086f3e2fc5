//! Errors raised by the depot data model.

use crate::job_card::JobCardStatus;

/// Result alias for data-model operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Contract violations on job cards and fleet figures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// Lifecycle moved backwards or stayed in place
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status
        from: JobCardStatus,
        /// Requested status
        to: JobCardStatus,
    },

    /// A delay bucket was recorded on a card without a delay
    #[error("job card {0} has a delay duration but no delay")]
    DelayDurationWithoutDelay(String),

    /// Repair duration must be a finite, non-negative number of hours
    #[error("invalid repair duration: {0}")]
    InvalidRepairDuration(f64),

    /// Fleet denominators must be finite and non-negative
    #[error("invalid fleet figure {name}: {value}")]
    InvalidFleetFigure {
        /// Which figure
        name: &'static str,
        /// Offending value
        value: f64,
    },
}
