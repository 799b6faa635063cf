//! Canonical data model shared by the ward dashboard crates.
//!
//! Entities arrive here already translated from backend rows (see
//! `ward-records`); every computation in `ward-metrics` works on these
//! types only.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

mod entities;
mod filters;
mod summary;
pub mod time;

pub use entities::{
    Appointment, AppointmentStatus, Bed, BedStatus, EmergencyContact, HospitalSnapshot, Patient,
    PatientStatus, RecordId, StaffMember,
};
pub use filters::{PatientFilter, Selection, StatusFilter};
pub use summary::{
    AppointmentRates, AppointmentRosterEntry, BedRosterEntry, BedStatistics, DashboardMetrics,
    DepartmentAnalytics, DepartmentShare, DepartmentStatistics, DepartmentTrend, ReportMetrics,
    ReportRange,
};

/// Placeholder rendered when a patient reference cannot be resolved.
pub const UNKNOWN_PATIENT: &str = "Unknown Patient";

/// Department label for patients whose department is blank.
pub const UNASSIGNED_DEPARTMENT: &str = "Unassigned";

/// Tunables for the aggregation engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed bed count assumed per department for capacity-based occupancy.
    pub bed_capacity_per_department: u32,
    /// Number of entries returned by `recent_admissions` when no limit is given.
    pub recent_admissions_limit: usize,
    /// Length (days) of each trailing window in department trends.
    pub trend_window_days: u32,
    /// Offset from UTC (minutes) that defines the local calendar day.
    pub utc_offset_minutes: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bed_capacity_per_department: 50,
            recent_admissions_limit: 5,
            trend_window_days: 7,
            utc_offset_minutes: 0,
        }
    }
}

impl EngineConfig {
    /// Resolve the configured offset, rejecting values outside ±24h.
    pub fn local_offset(&self) -> Result<FixedOffset, WardError> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                WardError::InvalidArgument(format!(
                    "utc_offset_minutes must be within ±1439, received {}",
                    self.utc_offset_minutes
                ))
            })
    }
}

/// Errors surfaced by the ward crates.
///
/// Only caller mistakes end up here. Missing or malformed field values are
/// absorbed where they are read.
#[derive(Debug, thiserror::Error)]
pub enum WardError {
    #[error("argument `{argument}` must be {expected}, received {found}")]
    ContractViolation {
        argument: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("could not read input: {0}")]
    Parse(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_dashboard_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.bed_capacity_per_department, 50);
        assert_eq!(config.recent_admissions_limit, 5);
        assert_eq!(config.trend_window_days, 7);
        assert_eq!(config.local_offset().unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"utc_offset_minutes": 420}"#).unwrap();
        assert_eq!(config.utc_offset_minutes, 420);
        assert_eq!(config.bed_capacity_per_department, 50);
        assert_eq!(config.local_offset().unwrap().local_minus_utc(), 420 * 60);
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        let config = EngineConfig {
            utc_offset_minutes: 24 * 60,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.local_offset(),
            Err(WardError::InvalidArgument(_))
        ));
    }
}
