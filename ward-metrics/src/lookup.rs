use ward_core::{Patient, RecordId, UNKNOWN_PATIENT};

pub fn find_patient<'a>(patients: &'a [Patient], patient_id: &RecordId) -> Option<&'a Patient> {
    patients.iter().find(|patient| &patient.id == patient_id)
}

/// Display name for a patient reference, or [`UNKNOWN_PATIENT`] when the
/// reference dangles or the record carries no name.
pub fn resolve_patient_name(patients: &[Patient], patient_id: &RecordId) -> String {
    find_patient(patients, patient_id)
        .and_then(Patient::display_name)
        .unwrap_or_else(|| UNKNOWN_PATIENT.to_string())
}
