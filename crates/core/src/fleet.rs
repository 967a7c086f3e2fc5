//! Fleet-wide denominators supplied by the caller.

use serde::{Deserialize, Serialize};
use crate::error::{CoreError, Result};

/// Distance and service time for the reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FleetContext {
    /// Distance traveled by all trains over the period (km)
    pub total_fleet_kilometers: f64,

    /// Calendar hours x train count for the period
    pub total_possible_service_hours: f64,
}

impl FleetContext {
    /// Create a context, rejecting negative or non-finite figures.
    pub fn new(total_fleet_kilometers: f64, total_possible_service_hours: f64) -> Result<Self> {
        check("total_fleet_kilometers", total_fleet_kilometers)?;
        check("total_possible_service_hours", total_possible_service_hours)?;
        Ok(Self {
            total_fleet_kilometers,
            total_possible_service_hours,
        })
    }

    /// Derive possible service hours from the calendar length and fleet size.
    pub fn from_calendar(calendar_hours: f64, train_count: u32, total_fleet_kilometers: f64) -> Result<Self> {
        check("calendar_hours", calendar_hours)?;
        Self::new(total_fleet_kilometers, calendar_hours * f64::from(train_count))
    }
}

fn check(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::InvalidFleetFigure { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_calendar() {
        let fleet = FleetContext::from_calendar(720.0, 10, 250_000.0).unwrap();
        assert_eq!(fleet.total_possible_service_hours, 7200.0);
        assert_eq!(fleet.total_fleet_kilometers, 250_000.0);
    }

    #[test]
    fn test_zero_is_legitimate() {
        assert!(FleetContext::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_rejects_bad_figures() {
        assert!(matches!(
            FleetContext::new(-1.0, 10.0),
            Err(CoreError::InvalidFleetFigure { name: "total_fleet_kilometers", .. })
        ));
        assert!(FleetContext::new(1.0, f64::NAN).is_err());
        assert!(FleetContext::from_calendar(f64::INFINITY, 3, 1.0).is_err());
    }
}
