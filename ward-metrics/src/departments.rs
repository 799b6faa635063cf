//! Department statistics, trends and breakdowns.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use ward_core::{
    DepartmentAnalytics, DepartmentShare, DepartmentStatistics, DepartmentTrend, Patient,
    StaffMember, UNASSIGNED_DEPARTMENT,
};

use crate::rate::{percent, rate};

/// Capacity-based statistics for one department.
///
/// `occupancy` divides the patient count by `bed_capacity`, a planning
/// constant; use bed statistics over the ward for real occupancy.
pub fn compute_department_statistics(
    patients: &[Patient],
    staff: &[StaffMember],
    department: &str,
    bed_capacity: u32,
) -> DepartmentStatistics {
    let members: Vec<&Patient> = patients
        .iter()
        .filter(|patient| patient.in_department(department))
        .collect();

    DepartmentStatistics {
        department: department.to_string(),
        patients: members.len(),
        staff: staff
            .iter()
            .filter(|member| member.department() == department)
            .count(),
        critical: members.iter().filter(|patient| patient.is_critical()).count(),
        occupancy: rate(members.len(), bed_capacity as usize),
    }
}

/// Admissions in the trailing window versus the window before it.
///
/// With `reference = R` and a window of `w` days the windows are
/// `[R - w, R)` and `[R - 2w, R - w)`. Patients with unknown admission dates
/// are ignored.
pub fn compute_department_trend(
    patients: &[Patient],
    department: &str,
    reference: DateTime<Utc>,
    window_days: u32,
) -> DepartmentTrend {
    trend_over(
        patients
            .iter()
            .filter(|patient| patient.in_department(department))
            .filter_map(|patient| patient.admission_date),
        reference,
        window_days,
    )
}

fn trend_over<I>(admissions: I, reference: DateTime<Utc>, window_days: u32) -> DepartmentTrend
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let window = Duration::days(i64::from(window_days));
    let last_start = reference
        .checked_sub_signed(window)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let prev_start = last_start
        .checked_sub_signed(window)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let (mut last_week, mut prev_week) = (0i64, 0i64);
    for admitted in admissions {
        if admitted >= last_start && admitted < reference {
            last_week += 1;
        } else if admitted >= prev_start && admitted < last_start {
            prev_week += 1;
        }
    }

    let delta = last_week - prev_week;
    DepartmentTrend {
        delta,
        percentage: if prev_week > 0 {
            percent(delta, prev_week)
        } else {
            0
        },
    }
}

fn department_key(patient: &Patient) -> &str {
    let name = patient.department();
    if name.is_empty() {
        UNASSIGNED_DEPARTMENT
    } else {
        name
    }
}

/// Patient count and share per department, in first-appearance order.
pub fn department_breakdown(patients: &[Patient]) -> Vec<DepartmentShare> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for patient in patients {
        let key = department_key(patient);
        let count = counts.entry(key).or_insert_with(|| {
            order.push(key);
            0
        });
        *count += 1;
    }

    order
        .into_iter()
        .map(|department| {
            let count = counts.get(department).copied().unwrap_or_default();
            DepartmentShare {
                department: department.to_string(),
                patients: count,
                share: rate(count, patients.len()),
            }
        })
        .collect()
}

/// Breakdown entries joined with their week-over-week trend.
pub fn department_analytics(
    patients: &[Patient],
    reference: DateTime<Utc>,
    window_days: u32,
) -> Vec<DepartmentAnalytics> {
    department_breakdown(patients)
        .into_iter()
        .map(|share| {
            let trend = trend_over(
                patients
                    .iter()
                    .filter(|patient| department_key(patient) == share.department)
                    .filter_map(|patient| patient.admission_date),
                reference,
                window_days,
            );
            DepartmentAnalytics { share, trend }
        })
        .collect()
}

/// Distinct department names across patients then staff.
pub fn departments(patients: &[Patient], staff: &[StaffMember]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let candidates = patients
        .iter()
        .map(Patient::department)
        .chain(staff.iter().map(StaffMember::department));

    for name in candidates.filter(|name| !name.is_empty()) {
        if !names.iter().any(|known| known == name) {
            names.push(name.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ward_core::{PatientStatus, RecordId};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
    }

    fn patient(department: &str, admitted: Option<DateTime<Utc>>) -> Patient {
        Patient {
            id: RecordId::from(department),
            department: Some(department.into()),
            admission_date: admitted,
            ..Patient::default()
        }
    }

    #[test]
    fn window_bounds_are_half_open() {
        let reference = at(17);
        let patients = vec![
            // exactly reference - 7d: last week
            patient("ICU", Some(at(10))),
            // exactly reference: in neither window
            patient("ICU", Some(at(17))),
            // exactly reference - 14d: previous week
            patient("ICU", Some(at(3))),
        ];
        let trend = compute_department_trend(&patients, "ICU", reference, 7);
        assert_eq!(trend, DepartmentTrend { delta: 0, percentage: 0 });
    }

    #[test]
    fn zero_baseline_gives_zero_percentage() {
        let patients = vec![patient("ICU", Some(at(15))), patient("ICU", Some(at(16)))];
        let trend = compute_department_trend(&patients, "ICU", at(17), 7);
        assert_eq!(trend, DepartmentTrend { delta: 2, percentage: 0 });
    }

    #[test]
    fn decline_is_negative() {
        let patients = vec![
            patient("ICU", Some(at(5))),
            patient("ICU", Some(at(6))),
            patient("ICU", Some(at(15))),
        ];
        let trend = compute_department_trend(&patients, "ICU", at(17), 7);
        assert_eq!(trend, DepartmentTrend { delta: -1, percentage: -50 });
    }

    #[test]
    fn statistics_count_staff_and_critical() {
        let mut critical = patient("ICU", None);
        critical.current_status = Some(PatientStatus::Critical);
        let patients = vec![critical, patient("ICU", None), patient("Cardiology", None)];
        let staff = vec![StaffMember {
            id: RecordId::from("s1"),
            department: Some("ICU".into()),
            ..StaffMember::default()
        }];

        let stats = compute_department_statistics(&patients, &staff, "ICU", 50);
        assert_eq!(stats.patients, 2);
        assert_eq!(stats.staff, 1);
        assert_eq!(stats.critical, 1);
        assert_eq!(stats.occupancy, 4);

        assert_eq!(
            compute_department_statistics(&patients, &staff, "ICU", 0).occupancy,
            0
        );
    }

    #[test]
    fn breakdown_keeps_first_appearance_order() {
        let patients = vec![
            patient("ICU", None),
            patient("", None),
            patient("Cardiology", None),
            patient("ICU", None),
        ];
        let breakdown = department_breakdown(&patients);
        let summary: Vec<(&str, usize, u32)> = breakdown
            .iter()
            .map(|s| (s.department.as_str(), s.patients, s.share))
            .collect();
        assert_eq!(
            summary,
            [
                ("ICU", 2, 50),
                (UNASSIGNED_DEPARTMENT, 1, 25),
                ("Cardiology", 1, 25)
            ]
        );
    }

    #[test]
    fn padded_department_names_agree_across_views() {
        let patients = vec![
            patient("ICU", Some(at(15))),
            patient("ICU ", Some(at(16))),
            patient(" Cardiology", None),
        ];

        let breakdown = department_breakdown(&patients);
        assert_eq!(breakdown[0].department, "ICU");
        assert_eq!(breakdown[0].patients, 2);

        let stats = compute_department_statistics(&patients, &[], "ICU", 50);
        assert_eq!(stats.patients, 2);

        let trend = compute_department_trend(&patients, "ICU", at(17), 7);
        assert_eq!(trend.delta, 2);

        let analytics = department_analytics(&patients, at(17), 7);
        assert_eq!(analytics[0].trend, trend);
        assert_eq!(departments(&patients, &[]), ["ICU", "Cardiology"]);
    }

    #[test]
    fn department_names_are_distinct() {
        let patients = vec![patient("ICU", None), patient(" ", None), patient("ICU", None)];
        let staff = vec![StaffMember {
            id: RecordId::from("s1"),
            department: Some("Radiology".into()),
            ..StaffMember::default()
        }];
        assert_eq!(departments(&patients, &staff), ["ICU", "Radiology"]);
    }
}
