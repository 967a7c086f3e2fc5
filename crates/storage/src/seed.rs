//! Deterministic sample job cards for demos and tests.

use chrono::{Datelike, Duration};
use depot_core::{
    DelayDuration, FailureCategory, JobCard, JobCardId, JobCardStatus, MaintenanceType, Time,
};

/// Subsystems cycled through by the generator.
pub const SAMPLE_SYSTEMS: [&str; 8] = [
    "Propulsion",
    "Doors",
    "HVAC",
    "Brakes",
    "Signalling",
    "Auxiliary Power",
    "Bogie",
    "Pantograph",
];

const CARS: [&str; 6] = ["DMC1", "TC1", "MC1", "MC2", "TC2", "DMC2"];
const TRAINS: usize = 24;

/// Generate `count` job cards, one every six hours from `start`.
///
/// Output depends only on the arguments, so repeated calls give identical
/// cards (ids included).
pub fn sample_job_cards(count: usize, start: Time) -> Vec<JobCard> {
    (0..count).map(|i| sample_job_card(i, start)).collect()
}

fn sample_job_card(i: usize, start: Time) -> JobCard {
    let reported_at = start + Duration::hours(6 * i as i64);
    let seq = i + 1;

    let maintenance_type = match i % 7 {
        5 => MaintenanceType::Preventive,
        6 => MaintenanceType::OtherPreventive,
        _ => MaintenanceType::Corrective,
    };

    let mut card = JobCard::new(
        format!("JC-{}-{:04}", reported_at.year(), seq),
        format!("TS{:02}", i % TRAINS + 1),
        CARS[i % CARS.len()],
        SAMPLE_SYSTEMS[i % SAMPLE_SYSTEMS.len()],
        maintenance_type,
    )
    .with_fracas_id(format!("FRACAS-{:05}", seq))
    .with_description(format!("{} fault reported by crew", SAMPLE_SYSTEMS[i % SAMPLE_SYSTEMS.len()]))
    .with_crew(1 + (i % 4) as u32)
    .reported_at(reported_at);

    card.id = JobCardId::from_parts(reported_at.timestamp_millis().max(0) as u64, seq as u128);

    if i % 5 != 4 {
        card = card.with_category(FailureCategory::ALL[i % FailureCategory::ALL.len()]);
    }
    if i % 11 == 0 {
        card = card.with_withdraw();
    }
    if i % 3 == 0 {
        card = card.with_delay(DelayDuration::ALL[(i / 3) % DelayDuration::ALL.len()]);
    }

    card.status = match i % 9 {
        0 | 1 => JobCardStatus::Open,
        2 | 3 => JobCardStatus::InProgress,
        4 | 5 => JobCardStatus::Completed,
        _ => JobCardStatus::Closed,
    };

    if card.status.is_finished() {
        let hours = 0.5 + ((i * 7) % 12) as f64 * 0.5;
        let completed_at = reported_at + Duration::minutes((hours * 60.0) as i64);
        card.duration_of_repair = Some(hours);
        card.completed_at = Some(completed_at);
        card.action_taken = Some("Component replaced and tested".to_string());
        if card.status == JobCardStatus::Closed {
            card.closed_at = Some(completed_at + Duration::hours(2));
        }
    }

    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn start() -> Time {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(sample_job_cards(50, start()), sample_job_cards(50, start()));
    }

    #[test]
    fn test_cards_are_valid() {
        let cards = sample_job_cards(100, start());
        assert_eq!(cards.len(), 100);
        for card in &cards {
            card.validate().unwrap();
            assert_eq!(card.duration_of_repair.is_some(), card.status.is_finished());
        }
        assert_eq!(cards[0].job_card_no, "JC-2024-0001");
        assert_eq!(cards[0].fracas_id, "FRACAS-00001");
    }

    #[test]
    fn test_ids_unique() {
        let cards = sample_job_cards(200, start());
        let ids: std::collections::HashSet<_> = cards.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), cards.len());
    }

    #[test]
    fn test_some_cards_lack_category() {
        let cards = sample_job_cards(10, start());
        assert!(cards.iter().any(|c| c.failure_category.is_none()));
        assert!(cards.iter().any(|c| c.failure_category.is_some()));
    }
}
