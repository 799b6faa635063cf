//! Reports page aggregation.

use chrono::{DateTime, Utc};
use ward_core::{Appointment, AppointmentStatus, Bed, Patient, ReportMetrics, ReportRange};

use crate::beds::compute_bed_statistics;
use crate::departments::department_breakdown;
use crate::rate::rate;

pub fn compute_report_metrics(
    patients: &[Patient],
    appointments: &[Appointment],
    beds: &[Bed],
    range: ReportRange,
    as_of: DateTime<Utc>,
) -> ReportMetrics {
    let cutoff = range.cutoff(as_of);
    let bed_stats = compute_bed_statistics(beds);
    let completed = appointments
        .iter()
        .filter(|appointment| appointment.status == Some(AppointmentStatus::Completed))
        .count();

    let report = ReportMetrics {
        range,
        total_patients: patients.len(),
        new_patients: patients
            .iter()
            .filter_map(|patient| patient.admission_date)
            .filter(|admitted| *admitted >= cutoff)
            .count(),
        critical_patients: patients.iter().filter(|patient| patient.is_critical()).count(),
        departments: department_breakdown(patients),
        total_beds: bed_stats.total,
        occupied_beds: bed_stats.occupied,
        occupancy_rate: bed_stats.occupancy_rate,
        completion_rate: rate(completed, appointments.len()),
    };

    tracing::debug!(
        ?range,
        %cutoff,
        new_patients = report.new_patients,
        departments = report.departments.len(),
        "computed report metrics"
    );
    report
}
