//! Query filter for job cards.

use serde::{Deserialize, Serialize};
use crate::job_card::{JobCard, JobCardStatus, MaintenanceType};
use crate::Time;

/// Filter for querying job cards. Unset criteria match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobCardFilter {
    /// Filter by status
    pub status: Option<Vec<JobCardStatus>>,

    /// Filter by maintenance type
    pub maintenance_type: Option<Vec<MaintenanceType>>,

    /// Filter by train number
    pub train_no: Option<String>,

    /// Filter by subsystem (exact match)
    pub system: Option<String>,

    /// Reported on or after
    pub reported_from: Option<Time>,

    /// Reported on or before
    pub reported_to: Option<Time>,
}

impl JobCardFilter {
    /// Whether a card satisfies every set criterion.
    pub fn matches(&self, card: &JobCard) -> bool {
        if let Some(statuses) = &self.status {
            if !statuses.contains(&card.status) {
                return false;
            }
        }
        if let Some(types) = &self.maintenance_type {
            if !types.contains(&card.maintenance_type) {
                return false;
            }
        }
        if let Some(train_no) = &self.train_no {
            if &card.train_no != train_no {
                return false;
            }
        }
        if let Some(system) = &self.system {
            if &card.system != system {
                return false;
            }
        }
        if let Some(from) = self.reported_from {
            if card.reported_at < from {
                return false;
            }
        }
        if let Some(to) = self.reported_to {
            if card.reported_at > to {
                return false;
            }
        }
        true
    }
}
