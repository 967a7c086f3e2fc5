//! Job card model - one FRACAS failure report for one train car.

use serde::{Deserialize, Serialize};
use crate::error::{CoreError, Result};
use crate::id::JobCardId;
use crate::Time;

/// A job card documents a reported fault and its resolution.
///
/// Optional fields are tolerated when missing from stored records: flags
/// default to `false`, options to `None`, free text to the empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobCard {
    /// Unique identifier
    pub id: JobCardId,

    /// Human-readable card number, e.g. `JC-2024-0001`
    #[serde(default)]
    pub job_card_no: String,

    /// FRACAS reference
    #[serde(default)]
    pub fracas_id: String,

    /// Maintenance type
    pub maintenance_type: MaintenanceType,

    /// Root-cause class, if analysed. Unrecognised labels load as `None`.
    #[serde(default, deserialize_with = "lenient_label")]
    pub failure_category: Option<FailureCategory>,

    /// Train pulled from service because of this failure
    #[serde(default)]
    pub withdraw: bool,

    /// Passenger service was delayed
    #[serde(default)]
    pub delay: bool,

    /// Delay bucket; only meaningful when `delay` is set. Unrecognised labels
    /// load as `None`.
    #[serde(default, deserialize_with = "lenient_label")]
    pub delay_duration: Option<DelayDuration>,

    /// Repair duration in hours, known once work is finished
    #[serde(default)]
    pub duration_of_repair: Option<f64>,

    /// Crew headcount
    #[serde(default)]
    pub no_of_men: Option<u32>,

    /// Lifecycle status
    pub status: JobCardStatus,

    /// Subsystem name, e.g. `Propulsion`. Compared verbatim.
    #[serde(default)]
    pub system: String,

    /// Train number
    #[serde(default)]
    pub train_no: String,

    /// Car number
    #[serde(default)]
    pub car_no: String,

    /// What went wrong
    #[serde(default)]
    pub failure_description: String,

    /// Corrective action taken
    #[serde(default)]
    pub action_taken: Option<String>,

    /// When the fault was reported
    pub reported_at: Time,

    /// When repair work finished
    #[serde(default)]
    pub completed_at: Option<Time>,

    /// When the card was closed
    #[serde(default)]
    pub closed_at: Option<Time>,
}

impl JobCard {
    /// Open a new job card for a fault reported now.
    pub fn new(
        job_card_no: impl Into<String>,
        train_no: impl Into<String>,
        car_no: impl Into<String>,
        system: impl Into<String>,
        maintenance_type: MaintenanceType,
    ) -> Self {
        Self {
            id: JobCardId::new(),
            job_card_no: job_card_no.into(),
            fracas_id: String::new(),
            maintenance_type,
            failure_category: None,
            withdraw: false,
            delay: false,
            delay_duration: None,
            duration_of_repair: None,
            no_of_men: None,
            status: JobCardStatus::Open,
            system: system.into(),
            train_no: train_no.into(),
            car_no: car_no.into(),
            failure_description: String::new(),
            action_taken: None,
            reported_at: chrono::Utc::now(),
            completed_at: None,
            closed_at: None,
        }
    }

    /// Set the FRACAS reference.
    pub fn with_fracas_id(mut self, fracas_id: impl Into<String>) -> Self {
        self.fracas_id = fracas_id.into();
        self
    }

    /// Set the failure category.
    pub fn with_category(mut self, category: FailureCategory) -> Self {
        self.failure_category = Some(category);
        self
    }

    /// Mark the train as withdrawn from service.
    pub fn with_withdraw(mut self) -> Self {
        self.withdraw = true;
        self
    }

    /// Record a service delay. Keeps `delay` and `delay_duration` consistent.
    pub fn with_delay(mut self, duration: DelayDuration) -> Self {
        self.delay = true;
        self.delay_duration = Some(duration);
        self
    }

    /// Set the fault description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.failure_description = description.into();
        self
    }

    /// Set the crew headcount.
    pub fn with_crew(mut self, no_of_men: u32) -> Self {
        self.no_of_men = Some(no_of_men);
        self
    }

    /// Override the report timestamp.
    pub fn reported_at(mut self, at: Time) -> Self {
        self.reported_at = at;
        self
    }

    /// Move to another lifecycle status.
    pub fn transition(&mut self, to: JobCardStatus) -> Result<()> {
        if !self.status.can_transition_to(to) {
            return Err(CoreError::InvalidTransition { from: self.status, to });
        }
        self.status = to;
        Ok(())
    }

    /// Start repair work.
    pub fn start(&mut self) -> Result<()> {
        self.transition(JobCardStatus::InProgress)
    }

    /// Finish repair work, recording how long it took.
    pub fn complete(&mut self, hours: f64, action_taken: Option<String>) -> Result<()> {
        check_repair_duration(hours)?;
        self.transition(JobCardStatus::Completed)?;
        self.duration_of_repair = Some(hours);
        if action_taken.is_some() {
            self.action_taken = action_taken;
        }
        self.completed_at = Some(chrono::Utc::now());
        Ok(())
    }

    /// Close the card. Closed cards accept no further transitions.
    pub fn close(&mut self) -> Result<()> {
        self.transition(JobCardStatus::Closed)?;
        let now = chrono::Utc::now();
        self.completed_at.get_or_insert(now);
        self.closed_at = Some(now);
        Ok(())
    }

    /// Check field-level invariants.
    pub fn validate(&self) -> Result<()> {
        if !self.delay && self.delay_duration.is_some() {
            return Err(CoreError::DelayDurationWithoutDelay(self.job_card_no.clone()));
        }
        if let Some(hours) = self.duration_of_repair {
            check_repair_duration(hours)?;
        }
        Ok(())
    }
}

/// Read an optional label field, treating anything that is not an exact
/// stored label as absent so the rest of the record still loads.
fn lenient_label<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| T::deserialize(v).ok()))
}

fn check_repair_duration(hours: f64) -> Result<()> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(CoreError::InvalidRepairDuration(hours));
    }
    Ok(())
}

/// Lifecycle status of a job card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobCardStatus {
    /// Fault reported
    Open,
    /// Repair under way
    InProgress,
    /// Repair finished, awaiting sign-off
    Completed,
    /// Signed off
    Closed,
}

impl JobCardStatus {
    /// Only forward moves are allowed; skipping ahead is fine.
    pub fn can_transition_to(self, to: JobCardStatus) -> bool {
        to > self
    }

    /// Whether repair work has finished.
    pub fn is_finished(self) -> bool {
        matches!(self, JobCardStatus::Completed | JobCardStatus::Closed)
    }

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            JobCardStatus::Open => "open",
            JobCardStatus::InProgress => "in_progress",
            JobCardStatus::Completed => "completed",
            JobCardStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for JobCardStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for JobCardStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "open" => Ok(JobCardStatus::Open),
            "in_progress" => Ok(JobCardStatus::InProgress),
            "completed" => Ok(JobCardStatus::Completed),
            "closed" => Ok(JobCardStatus::Closed),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

/// Maintenance type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceType {
    /// Corrective maintenance
    #[serde(rename = "CM")]
    Corrective,
    /// Preventive maintenance
    #[serde(rename = "PM")]
    Preventive,
    /// Other preventive maintenance
    #[serde(rename = "OPM")]
    OtherPreventive,
}

impl MaintenanceType {
    /// Short code.
    pub fn code(self) -> &'static str {
        match self {
            MaintenanceType::Corrective => "CM",
            MaintenanceType::Preventive => "PM",
            MaintenanceType::OtherPreventive => "OPM",
        }
    }
}

impl std::fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.code())
    }
}

impl std::str::FromStr for MaintenanceType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CM" => Ok(MaintenanceType::Corrective),
            "PM" => Ok(MaintenanceType::Preventive),
            "OPM" => Ok(MaintenanceType::OtherPreventive),
            other => Err(format!("unknown maintenance type: {}", other)),
        }
    }
}

/// Root-cause class of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureCategory {
    /// Design shortfall
    #[serde(rename = "System Design")]
    SystemDesign,
    /// Software fault
    #[serde(rename = "Software Error")]
    SoftwareError,
    /// Poor workmanship
    #[serde(rename = "Poor Workmanship")]
    PoorWorkmanship,
    /// Defect from manufacture
    #[serde(rename = "Manufacturing Defect")]
    ManufacturingDefect,
    /// Normal wear
    #[serde(rename = "Wear and Tear")]
    WearAndTear,
    /// Outside cause, e.g. vandalism or weather
    #[serde(rename = "External Factor")]
    ExternalFactor,
    /// Driver or operator mistake
    #[serde(rename = "Operator Error")]
    OperatorError,
    /// Introduced by earlier maintenance
    #[serde(rename = "Maintenance Induced")]
    MaintenanceInduced,
    /// Fault could not be reproduced
    #[serde(rename = "No Fault Found")]
    NoFaultFound,
}

impl FailureCategory {
    /// Every category.
    pub const ALL: [FailureCategory; 9] = [
        FailureCategory::SystemDesign,
        FailureCategory::SoftwareError,
        FailureCategory::PoorWorkmanship,
        FailureCategory::ManufacturingDefect,
        FailureCategory::WearAndTear,
        FailureCategory::ExternalFactor,
        FailureCategory::OperatorError,
        FailureCategory::MaintenanceInduced,
        FailureCategory::NoFaultFound,
    ];

    /// Display label, identical to the stored form.
    pub fn label(self) -> &'static str {
        match self {
            FailureCategory::SystemDesign => "System Design",
            FailureCategory::SoftwareError => "Software Error",
            FailureCategory::PoorWorkmanship => "Poor Workmanship",
            FailureCategory::ManufacturingDefect => "Manufacturing Defect",
            FailureCategory::WearAndTear => "Wear and Tear",
            FailureCategory::ExternalFactor => "External Factor",
            FailureCategory::OperatorError => "Operator Error",
            FailureCategory::MaintenanceInduced => "Maintenance Induced",
            FailureCategory::NoFaultFound => "No Fault Found",
        }
    }
}

impl std::fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

impl std::str::FromStr for FailureCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FailureCategory::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown failure category: {}", s))
    }
}

/// Service delay bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DelayDuration {
    /// Under a minute
    #[serde(rename = "Less than 1 Minute")]
    LessThanOneMinute,
    /// One minute
    #[serde(rename = "1 Minute")]
    OneMinute,
    /// Two minutes
    #[serde(rename = "2 Minutes")]
    TwoMinutes,
    /// Three minutes
    #[serde(rename = "3 Minutes")]
    ThreeMinutes,
    /// Four minutes
    #[serde(rename = "4 Minutes")]
    FourMinutes,
    /// Five minutes
    #[serde(rename = "5 Minutes")]
    FiveMinutes,
    /// Over five minutes
    #[serde(rename = "More than 5 Minutes")]
    MoreThanFiveMinutes,
}

impl DelayDuration {
    /// Buckets in increasing order.
    pub const ALL: [DelayDuration; 7] = [
        DelayDuration::LessThanOneMinute,
        DelayDuration::OneMinute,
        DelayDuration::TwoMinutes,
        DelayDuration::ThreeMinutes,
        DelayDuration::FourMinutes,
        DelayDuration::FiveMinutes,
        DelayDuration::MoreThanFiveMinutes,
    ];

    /// Display label, identical to the stored form.
    pub fn label(self) -> &'static str {
        match self {
            DelayDuration::LessThanOneMinute => "Less than 1 Minute",
            DelayDuration::OneMinute => "1 Minute",
            DelayDuration::TwoMinutes => "2 Minutes",
            DelayDuration::ThreeMinutes => "3 Minutes",
            DelayDuration::FourMinutes => "4 Minutes",
            DelayDuration::FiveMinutes => "5 Minutes",
            DelayDuration::MoreThanFiveMinutes => "More than 5 Minutes",
        }
    }
}

impl std::fmt::Display for DelayDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

impl std::str::FromStr for DelayDuration {
    type Err = String;

    /// Accepts the label or a bare minute count (`0` meaning under a minute,
    /// `6` or more meaning over five).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(minutes) = s.parse::<u32>() {
            return Ok(match minutes {
                0 => DelayDuration::LessThanOneMinute,
                1 => DelayDuration::OneMinute,
                2 => DelayDuration::TwoMinutes,
                3 => DelayDuration::ThreeMinutes,
                4 => DelayDuration::FourMinutes,
                5 => DelayDuration::FiveMinutes,
                _ => DelayDuration::MoreThanFiveMinutes,
            });
        }
        DelayDuration::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown delay duration: {}", s))
    }
}
