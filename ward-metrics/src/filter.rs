//! Stable list filters behind the patient, department and bed pages.

use ward_core::{Bed, Patient, PatientFilter, Selection};

/// Patients matching every active criterion, in input order.
///
/// The search term is compared as typed, case-insensitively, against the
/// full name, the legacy `name` field, phone and department.
pub fn filter_patients<'a>(patients: &'a [Patient], filter: &PatientFilter) -> Vec<&'a Patient> {
    let needle = filter.search_term.to_lowercase();

    let matched: Vec<&Patient> = patients
        .iter()
        .filter(|patient| needle.is_empty() || matches_search(patient, &needle))
        .filter(|patient| filter.status.matches(patient.current_status))
        .filter(|patient| filter.department.matches(patient.department()))
        .collect();

    tracing::debug!(
        total = patients.len(),
        matched = matched.len(),
        "filtered patient list"
    );
    matched
}

fn matches_search(patient: &Patient, needle: &str) -> bool {
    let haystacks = [
        patient.full_name(),
        patient.name.clone().unwrap_or_default(),
        patient.phone.clone().unwrap_or_default(),
        patient.department().to_string(),
    ];
    haystacks
        .iter()
        .any(|text| text.to_lowercase().contains(needle))
}

pub fn patients_in_department<'a>(
    patients: &'a [Patient],
    selection: &Selection,
) -> Vec<&'a Patient> {
    patients
        .iter()
        .filter(|patient| selection.matches(patient.department()))
        .collect()
}

pub fn beds_in_ward<'a>(beds: &'a [Bed], selection: &Selection) -> Vec<&'a Bed> {
    beds.iter().filter(|bed| selection.matches(bed.ward())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ward_core::{PatientStatus, RecordId, StatusFilter};

    fn patient(
        id: u64,
        first: &str,
        last: &str,
        department: &str,
        status: PatientStatus,
    ) -> Patient {
        Patient {
            id: RecordId::from(id),
            first_name: Some(first.into()),
            last_name: Some(last.into()),
            department: Some(department.into()),
            current_status: Some(status),
            ..Patient::default()
        }
    }

    fn ward() -> Vec<Patient> {
        vec![
            patient(1, "Ana", "Ruiz", "Cardiology", PatientStatus::Critical),
            patient(2, "Ben", "Ode", "ICU", PatientStatus::Stable),
            Patient {
                id: RecordId::from(3u64),
                name: Some("Chloe Park".into()),
                phone: Some("555-0199".into()),
                ..Patient::default()
            },
            patient(4, "Dana", "Anand", "Cardiology", PatientStatus::Stable),
        ]
    }

    fn search(patients: &[Patient], term: &str) -> Vec<String> {
        filter_patients(patients, &PatientFilter::search(term))
            .iter()
            .map(|p| p.id.to_string())
            .collect()
    }

    #[test]
    fn search_spans_name_phone_and_department() {
        let patients = ward();
        assert_eq!(search(&patients, "ANA"), ["1", "4"]);
        assert_eq!(search(&patients, "0199"), ["3"]);
        assert_eq!(search(&patients, "chloe"), ["3"]);
        assert_eq!(search(&patients, "icu"), ["2"]);
        assert!(search(&patients, "ruiz ana").is_empty());
    }

    #[test]
    fn full_name_matches_across_the_space() {
        let patients = ward();
        assert_eq!(search(&patients, "ana ruiz"), ["1"]);
    }

    #[test]
    fn surrounding_spaces_are_part_of_the_term() {
        let patients = ward();
        assert_eq!(search(&patients, " ana"), ["4"]);
        assert!(search(&patients, "ruiz ").is_empty());
        assert_eq!(search(&patients, " "), ["1", "2", "3", "4"]);
        assert_eq!(search(&patients, ""), ["1", "2", "3", "4"]);
    }

    #[test]
    fn criteria_combine() {
        let patients = ward();
        let filter = PatientFilter::default()
            .with_status(StatusFilter::Only(PatientStatus::Stable))
            .with_department(Selection::only("Cardiology"));
        let found = filter_patients(&patients, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_str(), "4");
    }

    #[test]
    fn department_selection_is_exact() {
        let patients = ward();
        assert!(patients_in_department(&patients, &Selection::only("cardiology")).is_empty());
        assert_eq!(patients_in_department(&patients, &Selection::All).len(), 4);
    }

    #[test]
    fn ward_filter() {
        let beds = vec![
            Bed {
                id: RecordId::from("b1"),
                ward: Some("North".into()),
                ..Bed::default()
            },
            Bed {
                id: RecordId::from("b2"),
                ..Bed::default()
            },
        ];
        let north = beds_in_ward(&beds, &Selection::only("North"));
        assert_eq!(north.len(), 1);
        assert_eq!(north[0].id.as_str(), "b1");
        assert_eq!(beds_in_ward(&beds, &Selection::All).len(), 2);
    }
}
