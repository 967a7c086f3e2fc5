//! Reliability reporting over an injected job card store.

use chrono::{DateTime, Utc};
use depot_core::{FleetContext, JobCard, JobCardFilter};
use depot_storage::JobCardStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use crate::engine::{
    self, CategoryStat, JobCardStatistics, SystemFailureStat,
};
use crate::Result;

/// Everything the reporting pages show for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityReport {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
    /// Denominators used
    pub fleet: FleetContext,
    /// Aggregate statistics
    pub statistics: JobCardStatistics,
    /// Per-subsystem breakdown
    pub systems: Vec<SystemFailureStat>,
    /// Per-category breakdown
    pub categories: Vec<CategoryStat>,
    /// Repair hours across all cards
    pub total_repair_hours: f64,
    /// Fleet availability percentage
    pub availability: f64,
}

impl ReliabilityReport {
    /// Build a report from cards already in hand.
    pub fn from_records(records: &[JobCard], fleet: FleetContext) -> Self {
        Self {
            generated_at: Utc::now(),
            fleet,
            statistics: engine::get_job_card_statistics(records, fleet.total_fleet_kilometers),
            systems: engine::get_system_failure_stats(records),
            categories: engine::get_failure_category_stats(records),
            total_repair_hours: engine::total_repair_hours(records),
            availability: engine::calculate_availability(records, fleet.total_possible_service_hours),
        }
    }
}

/// Produces reliability reports from whatever store it is given.
pub struct ReliabilityReporter<S: JobCardStore> {
    store: S,
    fleet: FleetContext,
}

impl<S: JobCardStore> ReliabilityReporter<S> {
    /// Create a reporter.
    pub fn new(store: S, fleet: FleetContext) -> Self {
        Self { store, fleet }
    }

    /// Create a reporter from raw fleet figures, validating them first.
    pub fn with_figures(store: S, total_fleet_kilometers: f64, total_possible_service_hours: f64) -> Result<Self> {
        let fleet = FleetContext::new(total_fleet_kilometers, total_possible_service_hours)?;
        Ok(Self::new(store, fleet))
    }

    /// Replace the fleet figures.
    pub fn with_fleet(mut self, fleet: FleetContext) -> Self {
        self.fleet = fleet;
        self
    }

    /// Fleet figures in use.
    pub fn fleet(&self) -> FleetContext {
        self.fleet
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn load(&self, filter: &JobCardFilter) -> Result<Vec<JobCard>> {
        let cards = self.store.list_job_cards(filter).await?;
        debug!("Loaded {} job cards for reporting", cards.len());
        Ok(cards)
    }

    /// Full report over the cards matching `filter`.
    pub async fn report(&self, filter: &JobCardFilter) -> Result<ReliabilityReport> {
        let cards = self.load(filter).await?;
        let report = ReliabilityReport::from_records(&cards, self.fleet);
        info!(
            "Reliability report: {} cards, {} service failures, MTTR {:.2} h, MDBF {:.0} km",
            report.statistics.total_cards,
            report.statistics.service_failures,
            report.statistics.mttr,
            report.statistics.mdbf,
        );
        Ok(report)
    }

    /// Aggregate statistics only.
    pub async fn statistics(&self, filter: &JobCardFilter) -> Result<JobCardStatistics> {
        let cards = self.load(filter).await?;
        Ok(engine::get_job_card_statistics(&cards, self.fleet.total_fleet_kilometers))
    }

    /// Per-subsystem breakdown only.
    pub async fn system_breakdown(&self, filter: &JobCardFilter) -> Result<Vec<SystemFailureStat>> {
        let cards = self.load(filter).await?;
        Ok(engine::get_system_failure_stats(&cards))
    }

    /// Per-category breakdown only.
    pub async fn category_breakdown(&self, filter: &JobCardFilter) -> Result<Vec<CategoryStat>> {
        let cards = self.load(filter).await?;
        Ok(engine::get_failure_category_stats(&cards))
    }

    /// Availability percentage only.
    pub async fn availability(&self, filter: &JobCardFilter) -> Result<f64> {
        let cards = self.load(filter).await?;
        Ok(engine::calculate_availability(&cards, self.fleet.total_possible_service_hours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use depot_core::{DelayDuration, JobCardId, JobCardStatus, MaintenanceType};
    use depot_storage::{MemoryStorage, StorageError};
    use crate::ReliabilityError;

    fn fleet() -> FleetContext {
        FleetContext::new(20_000.0, 1_000.0).unwrap()
    }

    fn cards() -> Vec<JobCard> {
        let mut a = JobCard::new("JC-1", "TS01", "DMC1", "Propulsion", MaintenanceType::Corrective)
            .with_delay(DelayDuration::FiveMinutes);
        a.status = JobCardStatus::Closed;
        a.duration_of_repair = Some(3.0);

        let mut b = JobCard::new("JC-2", "TS02", "TC1", "Doors", MaintenanceType::Corrective)
            .with_withdraw();
        b.status = JobCardStatus::Completed;
        b.duration_of_repair = Some(5.0);

        let c = JobCard::new("JC-3", "TS01", "MC1", "Propulsion", MaintenanceType::Preventive);

        let mut d = JobCard::new("JC-4", "TS03", "MC2", "HVAC", MaintenanceType::Corrective)
            .with_delay(DelayDuration::OneMinute);
        d.status = JobCardStatus::Closed;
        d.duration_of_repair = Some(1.0);

        vec![a, b, c, d]
    }

    #[tokio::test]
    async fn test_report_over_memory_store() {
        let reporter = ReliabilityReporter::new(MemoryStorage::with_cards(cards()), fleet());
        let report = reporter.report(&JobCardFilter::default()).await.unwrap();

        assert_eq!(report.statistics.total_cards, 4);
        assert_eq!(report.statistics.service_failures, 2);
        assert_eq!(report.statistics.mttr, 3.0);
        assert_eq!(report.statistics.mdbf, 10_000.0);
        assert_eq!(report.total_repair_hours, 9.0);
        assert_eq!(report.systems.len(), 3);
        assert_eq!(report.systems[0].system, "Propulsion");
        assert_eq!(report.systems[0].count, 2);
    }

    #[tokio::test]
    async fn test_filtered_report() {
        let reporter = ReliabilityReporter::new(MemoryStorage::with_cards(cards()), fleet());
        let filter = JobCardFilter {
            train_no: Some("TS01".to_string()),
            ..Default::default()
        };
        let stats = reporter.statistics(&filter).await.unwrap();
        assert_eq!(stats.total_cards, 2);
        assert_eq!(stats.service_failures, 1);
        assert_eq!(stats.mdbf, 20_000.0);
    }

    #[tokio::test]
    async fn test_availability_uses_fleet_hours() {
        let reporter = ReliabilityReporter::new(MemoryStorage::with_cards(cards()), fleet())
            .with_fleet(FleetContext::new(0.0, 36.0).unwrap());
        let availability = reporter.availability(&JobCardFilter::default()).await.unwrap();
        assert_eq!(availability, 75.0);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let reporter = ReliabilityReporter::new(MemoryStorage::new(), fleet());
        let report = reporter.report(&JobCardFilter::default()).await.unwrap();
        assert_eq!(report.statistics.mttr, 0.0);
        assert_eq!(report.statistics.mdbf, 0.0);
        assert!(report.systems.is_empty());
        assert!(report.categories.is_empty());
    }

    #[test]
    fn test_invalid_figures_rejected() {
        let result = ReliabilityReporter::with_figures(MemoryStorage::new(), -5.0, 100.0);
        assert!(matches!(result, Err(ReliabilityError::Core(_))));
    }

    struct FailingStore;

    #[async_trait]
    impl JobCardStore for FailingStore {
        async fn save_job_card(&mut self, _card: &JobCard) -> depot_storage::Result<()> { Ok(()) }
        async fn load_job_card(&self, _id: JobCardId) -> depot_storage::Result<Option<JobCard>> { Ok(None) }
        async fn list_job_cards(&self, _filter: &JobCardFilter) -> depot_storage::Result<Vec<JobCard>> {
            Err(StorageError::Other("store offline".to_string()))
        }
        async fn delete_job_card(&mut self, _id: JobCardId) -> depot_storage::Result<()> { Ok(()) }
    }

    #[tokio::test]
    async fn test_storage_error_propagates() {
        let reporter = ReliabilityReporter::new(FailingStore, fleet());
        let err = reporter.report(&JobCardFilter::default()).await.unwrap_err();
        assert!(matches!(err, ReliabilityError::Storage(_)));
    }

    #[test]
    fn test_report_serializes() {
        let report = ReliabilityReport::from_records(&cards(), fleet());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["statistics"]["service_failures"], 2);
        assert_eq!(json["categories"], serde_json::json!([]));
        assert_eq!(json["fleet"]["total_fleet_kilometers"], 20_000.0);
    }
}
