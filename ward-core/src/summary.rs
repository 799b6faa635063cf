//! Values produced by the aggregation engine.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{AppointmentStatus, BedStatus, RecordId};

/// Headline numbers of the home page.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_patients: usize,
    pub today_admissions: usize,
    pub available_beds: usize,
    pub pending_appointments: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BedStatistics {
    pub total: usize,
    pub available: usize,
    pub occupied: usize,
    pub cleaning: usize,
    pub maintenance: usize,
    /// Occupied share of all beds, in whole percent.
    pub occupancy_rate: u32,
}

/// Capacity-based view of one department. `occupancy` is relative to the
/// configured per-department capacity, not to real bed data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStatistics {
    pub department: String,
    pub patients: usize,
    pub staff: usize,
    pub critical: usize,
    pub occupancy: u32,
}

/// Week-over-week change in admissions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentTrend {
    pub delta: i64,
    pub percentage: i64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRates {
    pub total: usize,
    pub today: usize,
    pub upcoming: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub completion_rate: u32,
}

/// Look-back period of the reports page.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportRange {
    #[default]
    Week,
    Month,
    Year,
}

impl ReportRange {
    pub fn days(&self) -> i64 {
        match self {
            ReportRange::Week => 7,
            ReportRange::Month => 30,
            ReportRange::Year => 365,
        }
    }

    /// Earliest admission instant still counted as new.
    pub fn cutoff(&self, as_of: DateTime<Utc>) -> DateTime<Utc> {
        as_of
            .checked_sub_signed(Duration::days(self.days()))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl std::str::FromStr for ReportRange {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "week" => Ok(ReportRange::Week),
            "month" => Ok(ReportRange::Month),
            "year" => Ok(ReportRange::Year),
            other => Err(format!("unknown report range `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentShare {
    pub department: String,
    pub patients: usize,
    /// Share of all patients, in whole percent.
    pub share: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetrics {
    pub range: ReportRange,
    pub total_patients: usize,
    pub new_patients: usize,
    pub critical_patients: usize,
    pub departments: Vec<DepartmentShare>,
    pub total_beds: usize,
    pub occupied_beds: usize,
    pub occupancy_rate: u32,
    pub completion_rate: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentAnalytics {
    #[serde(flatten)]
    pub share: DepartmentShare,
    pub trend: DepartmentTrend,
}

/// One tile of the bed grid with its occupant resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BedRosterEntry {
    pub bed_id: RecordId,
    pub ward: Option<String>,
    pub number: Option<String>,
    pub status: Option<BedStatus>,
    pub patient_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRosterEntry {
    pub appointment_id: RecordId,
    pub date_time: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
    pub department: Option<String>,
    pub patient_name: String,
}
