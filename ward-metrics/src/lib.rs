//! Derived metrics for the hospital dashboard.
//!
//! Every function is a pure computation over borrowed snapshots. Nothing
//! here reads the clock: callers pass `as_of`/`reference` explicitly.
//! [`AggregationEngine`] bundles the free functions with an
//! [`EngineConfig`].

use chrono::{DateTime, FixedOffset, Offset, Utc};
use ward_core::{
    Appointment, AppointmentRates, AppointmentRosterEntry, Bed, BedRosterEntry, BedStatistics,
    DashboardMetrics, DepartmentAnalytics, DepartmentShare, DepartmentStatistics,
    DepartmentTrend, EngineConfig, HospitalSnapshot, Patient, PatientFilter, RecordId,
    ReportMetrics, ReportRange, Selection, StaffMember, WardError,
};

mod appointments;
mod beds;
mod dashboard;
mod departments;
mod filter;
mod lookup;
pub mod rate;
mod reports;

pub use appointments::{appointment_roster, compute_appointment_rates};
pub use beds::{bed_roster, compute_bed_statistics};
pub use dashboard::{compute_dashboard_metrics, recent_admissions};
pub use departments::{
    compute_department_statistics, compute_department_trend, department_analytics,
    department_breakdown, departments,
};
pub use filter::{beds_in_ward, filter_patients, patients_in_department};
pub use lookup::{find_patient, resolve_patient_name};
pub use reports::compute_report_metrics;

/// Stateless aggregation over hospital snapshots.
///
/// Holds only configuration, so one engine can serve any number of callers.
#[derive(Debug, Clone, Copy)]
pub struct AggregationEngine {
    config: EngineConfig,
    offset: FixedOffset,
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            offset: Utc.fix(),
        }
    }
}

impl AggregationEngine {
    pub fn new(config: EngineConfig) -> Result<Self, WardError> {
        let offset = config.local_offset()?;
        Ok(Self { config, offset })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn filter_patients<'a>(
        &self,
        patients: &'a [Patient],
        filter: &PatientFilter,
    ) -> Vec<&'a Patient> {
        filter_patients(patients, filter)
    }

    pub fn compute_dashboard_metrics(
        &self,
        patients: &[Patient],
        appointments: &[Appointment],
        beds: &[Bed],
        as_of: DateTime<Utc>,
    ) -> DashboardMetrics {
        compute_dashboard_metrics(patients, appointments, beds, as_of, &self.offset)
    }

    /// Dashboard metrics for a whole snapshot.
    pub fn dashboard(&self, snapshot: &HospitalSnapshot, as_of: DateTime<Utc>) -> DashboardMetrics {
        self.compute_dashboard_metrics(
            &snapshot.patients,
            &snapshot.appointments,
            &snapshot.beds,
            as_of,
        )
    }

    /// Uses the configured default limit.
    pub fn recent_admissions<'a>(&self, patients: &'a [Patient]) -> Vec<&'a Patient> {
        recent_admissions(patients, self.config.recent_admissions_limit)
    }

    pub fn recent_admissions_with_limit<'a>(
        &self,
        patients: &'a [Patient],
        limit: usize,
    ) -> Vec<&'a Patient> {
        recent_admissions(patients, limit)
    }

    pub fn compute_bed_statistics(&self, beds: &[Bed]) -> BedStatistics {
        compute_bed_statistics(beds)
    }

    /// Bed-based occupancy of a single ward.
    pub fn ward_bed_statistics(&self, beds: &[Bed], ward: &Selection) -> BedStatistics {
        compute_bed_statistics(beds_in_ward(beds, ward))
    }

    pub fn compute_department_statistics(
        &self,
        patients: &[Patient],
        staff: &[StaffMember],
        department: &str,
    ) -> DepartmentStatistics {
        compute_department_statistics(
            patients,
            staff,
            department,
            self.config.bed_capacity_per_department,
        )
    }

    pub fn compute_department_trend(
        &self,
        patients: &[Patient],
        department: &str,
        reference: DateTime<Utc>,
    ) -> DepartmentTrend {
        compute_department_trend(
            patients,
            department,
            reference,
            self.config.trend_window_days,
        )
    }

    pub fn compute_appointment_rates(
        &self,
        appointments: &[Appointment],
        reference: DateTime<Utc>,
    ) -> AppointmentRates {
        compute_appointment_rates(appointments, reference, &self.offset)
    }

    pub fn resolve_patient_name(&self, patients: &[Patient], patient_id: &RecordId) -> String {
        resolve_patient_name(patients, patient_id)
    }

    pub fn compute_report_metrics(
        &self,
        snapshot: &HospitalSnapshot,
        range: ReportRange,
        as_of: DateTime<Utc>,
    ) -> ReportMetrics {
        compute_report_metrics(
            &snapshot.patients,
            &snapshot.appointments,
            &snapshot.beds,
            range,
            as_of,
        )
    }

    pub fn department_breakdown(&self, patients: &[Patient]) -> Vec<DepartmentShare> {
        department_breakdown(patients)
    }

    pub fn department_analytics(
        &self,
        patients: &[Patient],
        reference: DateTime<Utc>,
    ) -> Vec<DepartmentAnalytics> {
        department_analytics(patients, reference, self.config.trend_window_days)
    }

    pub fn departments(&self, patients: &[Patient], staff: &[StaffMember]) -> Vec<String> {
        departments(patients, staff)
    }

    pub fn bed_roster(&self, beds: &[Bed], patients: &[Patient]) -> Vec<BedRosterEntry> {
        bed_roster(beds, patients)
    }

    pub fn appointment_roster(
        &self,
        appointments: &[Appointment],
        patients: &[Patient],
    ) -> Vec<AppointmentRosterEntry> {
        appointment_roster(appointments, patients)
    }
}
