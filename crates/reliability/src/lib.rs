//! FRACAS reliability metrics.
//!
//! Turns job cards into fleet KPIs: service failures, MTTR, MDBF,
//! availability, and per-system / per-category breakdowns.

#![warn(missing_docs)]

pub mod engine;
pub mod aggregate;
pub mod reporter;
mod error;

pub use engine::{
    is_service_failure, count_service_failures, calculate_mttr, calculate_mdbf,
    get_job_card_statistics, get_system_failure_stats, get_failure_category_stats,
    total_repair_hours, calculate_availability, system_group_key,
    JobCardStatistics, SystemFailureStat, CategoryStat, SERVICE_FAILURE_DELAYS,
};
pub use aggregate::ReliabilityTotals;
pub use reporter::{ReliabilityReport, ReliabilityReporter};
pub use error::{ReliabilityError, Result};
