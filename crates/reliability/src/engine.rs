//! Reliability metrics over job cards.
//!
//! Every function here is a pure read of the slice it is given. Ratios whose
//! denominator is zero come back as `0.0` through an explicit guard, never as
//! NaN or infinity.

use std::collections::HashMap;
use std::hash::Hash;
use depot_core::{DelayDuration, FailureCategory, JobCard, JobCardStatus, MaintenanceType};
use serde::{Deserialize, Serialize};

/// Delay buckets long enough to count as a service failure.
pub const SERVICE_FAILURE_DELAYS: [DelayDuration; 4] = [
    DelayDuration::ThreeMinutes,
    DelayDuration::FourMinutes,
    DelayDuration::FiveMinutes,
    DelayDuration::MoreThanFiveMinutes,
];

/// Aggregate job card statistics for a reporting period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobCardStatistics {
    /// Number of cards
    pub total_cards: usize,
    /// Cards with status `open`
    pub open: usize,
    /// Cards with status `in_progress`
    pub in_progress: usize,
    /// Cards with status `completed`
    pub completed: usize,
    /// Cards with status `closed`
    pub closed: usize,
    /// Corrective maintenance cards
    pub cm: usize,
    /// Preventive maintenance cards
    pub pm: usize,
    /// Other preventive maintenance cards
    pub opm: usize,
    /// Cards where the train was withdrawn
    pub with_withdraw: usize,
    /// Cards with any service delay
    pub with_delay: usize,
    /// Cards classified as service failures
    pub service_failures: usize,
    /// Mean distance between failures (km)
    pub mdbf: f64,
    /// Mean time to repair (hours)
    pub mttr: f64,
    /// Fleet distance the MDBF was derived from (km)
    pub total_kilometers: f64,
}

/// Failure counts for one subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemFailureStat {
    /// Subsystem name as recorded
    pub system: String,
    /// Cards for this subsystem
    pub count: usize,
    /// Service failures among them
    pub service_failures: usize,
}

/// Card count for one failure category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStat {
    /// Failure category
    pub category: FailureCategory,
    /// Cards in this category
    pub count: usize,
}

/// Whether a card caused a withdrawal or a delay of three minutes or more.
///
/// A delay bucket recorded without the `delay` flag is ignored.
pub fn is_service_failure(card: &JobCard) -> bool {
    card.withdraw
        || (card.delay
            && card
                .delay_duration
                .is_some_and(|d| SERVICE_FAILURE_DELAYS.contains(&d)))
}

/// Count service failures.
pub fn count_service_failures(records: &[JobCard]) -> usize {
    records.iter().filter(|c| is_service_failure(c)).count()
}

/// Repair durations that count toward MTTR: finished cards only.
pub(crate) fn mttr_durations(records: &[JobCard]) -> impl Iterator<Item = f64> + '_ {
    records
        .iter()
        .filter(|c| c.status.is_finished())
        .filter_map(|c| c.duration_of_repair)
}

/// Mean time to repair in hours over completed and closed cards.
pub fn calculate_mttr(records: &[JobCard]) -> f64 {
    let (sum, n) = mttr_durations(records).fold((0.0, 0usize), |(sum, n), h| (sum + h, n + 1));
    if n == 0 {
        return 0.0;
    }
    sum / n as f64
}

/// Mean distance between failures in km.
///
/// Zero failures yields `0.0`, which callers must not present as "perfect
/// reliability".
pub fn calculate_mdbf(total_kilometers: f64, service_failure_count: usize) -> f64 {
    if service_failure_count == 0 {
        return 0.0;
    }
    total_kilometers / service_failure_count as f64
}

/// Build the aggregate statistics for a set of cards.
pub fn get_job_card_statistics(records: &[JobCard], total_kilometers: f64) -> JobCardStatistics {
    let mut stats = JobCardStatistics {
        total_cards: records.len(),
        total_kilometers,
        ..Default::default()
    };

    for card in records {
        match card.status {
            JobCardStatus::Open => stats.open += 1,
            JobCardStatus::InProgress => stats.in_progress += 1,
            JobCardStatus::Completed => stats.completed += 1,
            JobCardStatus::Closed => stats.closed += 1,
        }
        match card.maintenance_type {
            MaintenanceType::Corrective => stats.cm += 1,
            MaintenanceType::Preventive => stats.pm += 1,
            MaintenanceType::OtherPreventive => stats.opm += 1,
        }
        if card.withdraw {
            stats.with_withdraw += 1;
        }
        if card.delay {
            stats.with_delay += 1;
        }
    }

    stats.service_failures = count_service_failures(records);
    stats.mdbf = calculate_mdbf(total_kilometers, stats.service_failures);
    stats.mttr = calculate_mttr(records);
    stats
}

/// Grouping key for a subsystem name.
///
/// Names are compared verbatim, so `HVAC` and `hvac` are separate groups.
pub fn system_group_key(system: &str) -> &str {
    system
}

/// Per-subsystem card and service-failure counts, in order of first
/// appearance.
pub fn get_system_failure_stats(records: &[JobCard]) -> Vec<SystemFailureStat> {
    group_in_order(records, |c| Some(system_group_key(&c.system)))
        .into_iter()
        .map(|(system, cards)| SystemFailureStat {
            system: system.to_string(),
            count: cards.len(),
            service_failures: cards.iter().filter(|c| is_service_failure(c)).count(),
        })
        .collect()
}

/// Per-category card counts, in order of first appearance. Cards without a
/// category are left out.
pub fn get_failure_category_stats(records: &[JobCard]) -> Vec<CategoryStat> {
    group_in_order(records, |c| c.failure_category)
        .into_iter()
        .map(|(category, cards)| CategoryStat {
            category,
            count: cards.len(),
        })
        .collect()
}

/// Sum of repair hours across every card, whatever its status.
pub fn total_repair_hours(records: &[JobCard]) -> f64 {
    records.iter().filter_map(|c| c.duration_of_repair).sum()
}

/// Fleet availability percentage.
///
/// Unlike MTTR this charges repair hours from cards of any status. The result
/// is not clamped and can go negative when repair hours exceed the period.
pub fn calculate_availability(records: &[JobCard], total_possible_service_hours: f64) -> f64 {
    availability_from_hours(total_possible_service_hours, total_repair_hours(records))
}

pub(crate) fn availability_from_hours(possible_hours: f64, repair_hours: f64) -> f64 {
    if possible_hours == 0.0 {
        return 0.0;
    }
    (possible_hours - repair_hours) / possible_hours * 100.0
}

fn group_in_order<'a, K, F>(records: &'a [JobCard], key: F) -> Vec<(K, Vec<&'a JobCard>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&'a JobCard) -> Option<K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&JobCard>)> = Vec::new();
    for card in records {
        let Some(k) = key(card) else { continue };
        match index.get(&k) {
            Some(&slot) => groups[slot].1.push(card),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![card]));
            }
        }
    }
    groups
}
