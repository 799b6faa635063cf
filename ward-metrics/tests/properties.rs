use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use ward_core::{Patient, PatientFilter, PatientStatus, RecordId, Selection, StatusFilter};
use ward_metrics::{compute_department_trend, filter_patients, recent_admissions};

const DEPARTMENTS: [&str; 4] = ["ICU", "Cardiology", "Emergency", ""];

fn base_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn status_strategy() -> impl Strategy<Value = Option<PatientStatus>> {
    prop_oneof![
        Just(None),
        Just(Some(PatientStatus::Admitted)),
        Just(Some(PatientStatus::Critical)),
        Just(Some(PatientStatus::Stable)),
        Just(Some(PatientStatus::DischargePending)),
    ]
}

fn patient_strategy() -> impl Strategy<Value = Patient> {
    (
        0u32..10_000,
        proptest::option::of("[A-Za-z]{1,8}"),
        proptest::option::of("[A-Za-z]{1,8}"),
        proptest::option::of("[0-9-]{4,10}"),
        0usize..DEPARTMENTS.len(),
        status_strategy(),
        proptest::option::of(0i64..60 * 24),
    )
        .prop_map(|(id, first, last, phone, dept, status, hours)| Patient {
            id: RecordId::from(u64::from(id)),
            first_name: first,
            last_name: last,
            phone,
            department: Some(DEPARTMENTS[dept].to_string()).filter(|d| !d.is_empty()),
            current_status: status,
            admission_date: hours.map(|h| base_instant() + Duration::hours(h)),
            ..Patient::default()
        })
}

fn filter_strategy() -> impl Strategy<Value = PatientFilter> {
    (
        "[a-zA-Z0-9 ]{0,3}",
        prop_oneof![
            Just(StatusFilter::All),
            Just(StatusFilter::Only(PatientStatus::Critical)),
            Just(StatusFilter::Only(PatientStatus::Stable)),
        ],
        prop_oneof![
            Just(Selection::All),
            Just(Selection::only("ICU")),
            Just(Selection::only("Cardiology")),
        ],
    )
        .prop_map(|(term, status, department)| {
            PatientFilter::search(term)
                .with_status(status)
                .with_department(department)
        })
}

fn is_ordered_subsequence(found: &[&Patient], all: &[Patient]) -> bool {
    let mut cursor = all.iter().map(|p| p as *const Patient);
    found
        .iter()
        .all(|candidate| cursor.any(|ptr| std::ptr::eq(ptr, *candidate)))
}

proptest! {
    #[test]
    fn filter_yields_ordered_subsequence_of_matches(
        patients in proptest::collection::vec(patient_strategy(), 0..40),
        filter in filter_strategy(),
    ) {
        let found = filter_patients(&patients, &filter);
        prop_assert!(is_ordered_subsequence(&found, &patients));

        let needle = filter.search_term.to_lowercase();
        for patient in &found {
            prop_assert!(filter.status.matches(patient.current_status));
            prop_assert!(filter.department.matches(patient.department()));
            if !needle.is_empty() {
                let haystack = format!(
                    "{}\n{}\n{}",
                    patient.full_name(),
                    patient.phone.as_deref().unwrap_or(""),
                    patient.department()
                )
                .to_lowercase();
                prop_assert!(haystack.contains(&needle));
            }
        }
    }

    #[test]
    fn default_filter_is_identity(
        patients in proptest::collection::vec(patient_strategy(), 0..40),
    ) {
        let found = filter_patients(&patients, &PatientFilter::default());
        prop_assert_eq!(found.len(), patients.len());
        prop_assert!(found.iter().zip(&patients).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn recent_admissions_is_bounded_and_non_mutating(
        patients in proptest::collection::vec(patient_strategy(), 0..40),
        limit in 0usize..12,
    ) {
        let before = patients.clone();
        let recent = recent_admissions(&patients, limit);

        prop_assert!(recent.len() <= limit);
        prop_assert_eq!(recent.len(), limit.min(patients.len()));
        prop_assert_eq!(&patients, &before);

        // Known dates never follow unknown ones and are newest first.
        let dates: Vec<Option<DateTime<Utc>>> = recent.iter().map(|p| p.admission_date).collect();
        for pair in dates.windows(2) {
            match (pair[0], pair[1]) {
                (Some(a), Some(b)) => prop_assert!(a >= b),
                (None, Some(_)) => prop_assert!(false, "unknown date sorted before a known one"),
                _ => {}
            }
        }
    }

    #[test]
    fn trend_percentage_is_zero_without_baseline(
        patients in proptest::collection::vec(patient_strategy(), 0..40),
        reference_hours in 0i64..60 * 24,
    ) {
        let reference = base_instant() + Duration::hours(reference_hours);
        let trend = compute_department_trend(&patients, "ICU", reference, 7);

        let prev_start = reference - Duration::days(14);
        let last_start = reference - Duration::days(7);
        let baseline = patients
            .iter()
            .filter(|p| p.in_department("ICU"))
            .filter_map(|p| p.admission_date)
            .filter(|at| *at >= prev_start && *at < last_start)
            .count();
        if baseline == 0 {
            prop_assert_eq!(trend.percentage, 0);
        }
    }
}
