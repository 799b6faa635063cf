//! Home page figures.

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset, Utc};
use ward_core::time::local_day;
use ward_core::{Appointment, AppointmentStatus, Bed, BedStatus, DashboardMetrics, Patient};

pub fn compute_dashboard_metrics(
    patients: &[Patient],
    appointments: &[Appointment],
    beds: &[Bed],
    as_of: DateTime<Utc>,
    offset: &FixedOffset,
) -> DashboardMetrics {
    let today = local_day(as_of, offset);

    let metrics = DashboardMetrics {
        total_patients: patients.len(),
        today_admissions: patients
            .iter()
            .filter_map(|patient| patient.admission_date)
            .filter(|admitted| local_day(*admitted, offset) == today)
            .count(),
        available_beds: beds
            .iter()
            .filter(|bed| bed.status == Some(BedStatus::Available))
            .count(),
        pending_appointments: appointments
            .iter()
            .filter(|appointment| appointment.status == Some(AppointmentStatus::Pending))
            .count(),
    };

    tracing::debug!(?metrics, %today, "computed dashboard metrics");
    metrics
}

/// Most recently admitted patients first. Unknown admission dates go last.
pub fn recent_admissions(patients: &[Patient], limit: usize) -> Vec<&Patient> {
    let mut ordered: Vec<&Patient> = patients.iter().collect();
    ordered.sort_by(|a, b| newest_first(a.admission_date, b.admission_date));
    ordered.truncate(limit);
    ordered
}

fn newest_first(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ward_core::time::parse_timestamp;
    use ward_core::RecordId;

    fn admitted(id: &str, at: Option<&str>) -> Patient {
        Patient {
            id: RecordId::from(id),
            admission_date: at.and_then(parse_timestamp),
            ..Patient::default()
        }
    }

    #[test]
    fn today_is_a_calendar_day_not_a_24h_window() {
        let patients = vec![
            admitted("a", Some("2024-01-17T00:05:00Z")),
            admitted("b", Some("2024-01-16T23:55:00Z")),
            admitted("c", None),
        ];
        let as_of = Utc.with_ymd_and_hms(2024, 1, 17, 9, 0, 0).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();

        let metrics = compute_dashboard_metrics(&patients, &[], &[], as_of, &utc);
        assert_eq!(metrics.total_patients, 3);
        assert_eq!(metrics.today_admissions, 1);
    }

    #[test]
    fn offset_moves_the_day_boundary() {
        let patients = vec![admitted("b", Some("2024-01-16T23:55:00Z"))];
        let as_of = Utc.with_ymd_and_hms(2024, 1, 17, 9, 0, 0).unwrap();
        let plus_one = FixedOffset::east_opt(3600).unwrap();

        let metrics = compute_dashboard_metrics(&patients, &[], &[], as_of, &plus_one);
        assert_eq!(metrics.today_admissions, 1);
    }

    #[test]
    fn unknown_dates_sort_last_in_input_order() {
        let patients = vec![
            admitted("x", None),
            admitted("old", Some("2023-12-01")),
            admitted("y", None),
            admitted("new", Some("2024-01-15")),
        ];
        let order: Vec<&str> = recent_admissions(&patients, 10)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(order, ["new", "old", "x", "y"]);
    }

    #[test]
    fn limit_caps_the_result() {
        let patients: Vec<Patient> = (0..8)
            .map(|day| admitted(&day.to_string(), Some(&format!("2024-01-0{}", day + 1))))
            .collect();
        let recent = recent_admissions(&patients, 5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].id.as_str(), "7");
        assert!(recent_admissions(&patients, 0).is_empty());
    }
}
