//! Depot core data models.
//!
//! This crate defines the job card (FRACAS failure report) and the fleet
//! figures that the reliability engine works over.

#![warn(missing_docs)]

// Core identities
mod id;
mod error;

// Job cards
mod job_card;
mod filter;

// Fleet denominators
mod fleet;

// Re-exports
pub use id::*;
pub use error::{CoreError, Result};

pub use job_card::{
    JobCard, JobCardStatus, MaintenanceType, FailureCategory, DelayDuration,
};
pub use filter::JobCardFilter;
pub use fleet::FleetContext;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
