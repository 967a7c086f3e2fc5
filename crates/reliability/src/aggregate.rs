//! Additive totals for combining independently processed batches.
//!
//! MTTR and MDBF are ratios and cannot be averaged across batches. Each batch
//! is reduced to sums instead; ratios are derived only after merging.

use std::iter::Sum;
use std::ops::Add;
use depot_core::JobCard;
use serde::{Deserialize, Serialize};
use crate::engine::{availability_from_hours, calculate_mdbf, count_service_failures, mttr_durations, total_repair_hours};

/// Sums from which the engine's ratios can be rebuilt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityTotals {
    /// Cards seen
    pub cards: usize,
    /// Service failures seen
    pub service_failures: usize,
    /// Sum of repair hours over finished cards
    pub finished_repair_hours: f64,
    /// Finished cards that carry a repair duration
    pub finished_repairs: usize,
    /// Sum of repair hours over all cards
    pub total_repair_hours: f64,
}

impl ReliabilityTotals {
    /// Reduce one batch to its totals.
    pub fn from_records(records: &[JobCard]) -> Self {
        let (finished_repair_hours, finished_repairs) =
            mttr_durations(records).fold((0.0, 0usize), |(sum, n), h| (sum + h, n + 1));
        Self {
            cards: records.len(),
            service_failures: count_service_failures(records),
            finished_repair_hours,
            finished_repairs,
            total_repair_hours: total_repair_hours(records),
        }
    }

    /// Combine with another batch's totals.
    pub fn merge(self, other: Self) -> Self {
        Self {
            cards: self.cards + other.cards,
            service_failures: self.service_failures + other.service_failures,
            finished_repair_hours: self.finished_repair_hours + other.finished_repair_hours,
            finished_repairs: self.finished_repairs + other.finished_repairs,
            total_repair_hours: self.total_repair_hours + other.total_repair_hours,
        }
    }

    /// Mean time to repair over the merged batches.
    pub fn mttr(&self) -> f64 {
        if self.finished_repairs == 0 {
            return 0.0;
        }
        self.finished_repair_hours / self.finished_repairs as f64
    }

    /// Mean distance between failures for the given fleet distance.
    pub fn mdbf(&self, total_kilometers: f64) -> f64 {
        calculate_mdbf(total_kilometers, self.service_failures)
    }

    /// Availability percentage for the given possible service hours.
    pub fn availability(&self, total_possible_service_hours: f64) -> f64 {
        availability_from_hours(total_possible_service_hours, self.total_repair_hours)
    }
}

impl Add for ReliabilityTotals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.merge(other)
    }
}

impl Sum for ReliabilityTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Self::merge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{calculate_availability, calculate_mttr};
    use chrono::{TimeZone, Utc};
    use depot_storage::sample_job_cards;

    #[test]
    fn test_empty_totals() {
        let totals = ReliabilityTotals::from_records(&[]);
        assert_eq!(totals, ReliabilityTotals::default());
        assert_eq!(totals.mttr(), 0.0);
        assert_eq!(totals.mdbf(10_000.0), 0.0);
    }

    #[test]
    fn test_batches_match_whole_set() {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let records = sample_job_cards(90, start);

        let whole = ReliabilityTotals::from_records(&records);
        let merged: ReliabilityTotals = records
            .chunks(17)
            .map(ReliabilityTotals::from_records)
            .sum();

        assert_eq!(merged.cards, whole.cards);
        assert_eq!(merged.service_failures, count_service_failures(&records));
        assert_eq!(merged.finished_repairs, whole.finished_repairs);
        assert!((merged.mttr() - calculate_mttr(&records)).abs() < 1e-9);
        assert!((merged.availability(5_000.0) - calculate_availability(&records, 5_000.0)).abs() < 1e-9);
        assert_eq!(merged.mdbf(90_000.0), calculate_mdbf(90_000.0, whole.service_failures));
    }

    #[test]
    fn test_merge_weights_by_repair_count() {
        let a = ReliabilityTotals {
            finished_repair_hours: 2.0,
            finished_repairs: 1,
            ..Default::default()
        };
        let b = ReliabilityTotals {
            finished_repair_hours: 30.0,
            finished_repairs: 3,
            ..Default::default()
        };
        // Averaging the batch means would give 6.0.
        assert_eq!((a + b).mttr(), 8.0);
    }
}
