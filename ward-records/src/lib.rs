//! Backend rows to canonical ward entities, and back.
//!
//! The hosted tables use snake_case columns plus the platform's `Id` and
//! `Name` columns. Rows exported from the dashboard use camelCase. Both
//! spellings are read here so the rest of the workspace only ever sees the
//! types from `ward-core`.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use ward_core::time::{parse_date, parse_timestamp};
use ward_core::{
    Appointment, Bed, EmergencyContact, HospitalSnapshot, Patient, RecordId, StaffMember,
    WardError,
};

type Row = Map<String, Value>;

/// Load a `{patients, appointments, beds, staff}` document from JSON text.
pub fn load_snapshot_str(document: &str) -> Result<HospitalSnapshot, WardError> {
    let value: Value =
        serde_json::from_str(document).map_err(|err| WardError::Parse(err.to_string()))?;
    load_snapshot(&value)
}

/// Load a snapshot document. Absent or `null` collections are empty.
pub fn load_snapshot(document: &Value) -> Result<HospitalSnapshot, WardError> {
    let Some(object) = document.as_object() else {
        return Err(contract_violation("snapshot", "a JSON object", document));
    };

    let collection = |key: &str| object.get(key).filter(|value| !value.is_null());

    let snapshot = HospitalSnapshot {
        patients: collection("patients")
            .map(patients_from_value)
            .transpose()?
            .unwrap_or_default(),
        appointments: collection("appointments")
            .map(appointments_from_value)
            .transpose()?
            .unwrap_or_default(),
        beds: collection("beds")
            .map(beds_from_value)
            .transpose()?
            .unwrap_or_default(),
        staff: collection("staff")
            .map(staff_from_value)
            .transpose()?
            .unwrap_or_default(),
    };

    tracing::debug!(
        patients = snapshot.patients.len(),
        appointments = snapshot.appointments.len(),
        beds = snapshot.beds.len(),
        staff = snapshot.staff.len(),
        "loaded hospital snapshot"
    );
    Ok(snapshot)
}

pub fn patients_from_value(value: &Value) -> Result<Vec<Patient>, WardError> {
    Ok(rows(value, "patients")?.map(patient_from_row).collect())
}

pub fn appointments_from_value(value: &Value) -> Result<Vec<Appointment>, WardError> {
    Ok(rows(value, "appointments")?
        .map(appointment_from_row)
        .collect())
}

pub fn beds_from_value(value: &Value) -> Result<Vec<Bed>, WardError> {
    Ok(rows(value, "beds")?.map(bed_from_row).collect())
}

pub fn staff_from_value(value: &Value) -> Result<Vec<StaffMember>, WardError> {
    Ok(rows(value, "staff")?.map(staff_from_row).collect())
}

/// Check that `value` is an array of objects before any row is mapped.
fn rows<'a>(value: &'a Value, argument: &str) -> Result<impl Iterator<Item = &'a Row>, WardError> {
    let Some(items) = value.as_array() else {
        return Err(contract_violation(argument, "a JSON array", value));
    };

    for (index, item) in items.iter().enumerate() {
        if !item.is_object() {
            return Err(contract_violation(
                &format!("{argument}[{index}]"),
                "a JSON object",
                item,
            ));
        }
    }

    Ok(items.iter().filter_map(Value::as_object))
}

fn contract_violation(argument: &str, expected: &'static str, found: &Value) -> WardError {
    WardError::ContractViolation {
        argument: argument.to_string(),
        expected,
        found: json_type(found),
    }
}

/// Article-prefixed JSON type name used in contract violation messages.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub fn patient_from_row(row: &Row) -> Patient {
    let first_name = text(row, &["first_name", "firstName"]);
    let last_name = text(row, &["last_name", "lastName"]);

    Patient {
        id: row_id(row, "patient"),
        name: text(row, &["Name", "name"]),
        first_name,
        last_name,
        date_of_birth: date(row, &["date_of_birth", "dateOfBirth"]),
        gender: text(row, &["gender"]),
        phone: text(row, &["phone"]),
        email: text(row, &["email"]),
        address: text(row, &["address"]),
        department: text(row, &["department"]),
        assigned_doctor: text(row, &["assigned_doctor", "assignedDoctor"]),
        bed_number: text(row, &["bed_number", "bedNumber"]),
        current_status: status(row, &["current_status", "currentStatus"]),
        admission_date: timestamp(row, &["admission_date", "admissionDate"]),
        emergency_contact: emergency_contact(row),
    }
}

fn emergency_contact(row: &Row) -> EmergencyContact {
    let flat = EmergencyContact {
        name: text(row, &["emergency_contact_name"]),
        phone: text(row, &["emergency_contact_phone"]),
        relationship: text(row, &["emergency_contact_relationship"]),
    };
    if !flat.is_empty() {
        return flat;
    }

    row.get("emergencyContact")
        .or_else(|| row.get("emergency_contact"))
        .and_then(Value::as_object)
        .map(|nested| EmergencyContact {
            name: text(nested, &["name", "Name"]),
            phone: text(nested, &["phone"]),
            relationship: text(nested, &["relationship"]),
        })
        .unwrap_or_default()
}

pub fn appointment_from_row(row: &Row) -> Appointment {
    Appointment {
        id: row_id(row, "appointment"),
        patient_id: reference(row, &["patient_id", "patientId"]),
        doctor_id: reference(row, &["doctor_id", "doctorId"]),
        date_time: timestamp(row, &["date_time", "dateTime"]),
        duration_minutes: minutes(row, &["duration"]),
        kind: text(row, &["type", "kind"]),
        status: status(row, &["status"]),
        department: text(row, &["department"]),
        room: text(row, &["room"]),
        notes: text(row, &["notes"]),
    }
}

pub fn bed_from_row(row: &Row) -> Bed {
    Bed {
        id: row_id(row, "bed"),
        ward: text(row, &["ward"]),
        number: text(row, &["number", "Name"]),
        status: status(row, &["status"]),
        patient_id: reference(row, &["patient_id", "patientId"]),
        last_cleaned: timestamp(row, &["last_cleaned", "lastCleaned"]),
    }
}

pub fn staff_from_row(row: &Row) -> StaffMember {
    StaffMember {
        id: row_id(row, "staff"),
        name: text(row, &["Name", "name"]),
        role: text(row, &["role"]),
        department: text(row, &["department"]),
        specialization: text(row, &["specialization"]),
        availability: text(row, &["availability"]),
        current_patients: references(row, &["current_patients", "currentPatients"]),
    }
}

/// Columns written back when a patient record is edited.
pub fn patient_to_row(patient: &Patient) -> Value {
    let combined_name = patient.display_name();
    json!({
        "Id": id_value(&patient.id),
        "Name": combined_name,
        "first_name": patient.first_name,
        "last_name": patient.last_name,
        "date_of_birth": patient.date_of_birth.map(|dob| dob.format("%Y-%m-%d").to_string()),
        "gender": patient.gender,
        "phone": patient.phone,
        "email": patient.email,
        "address": patient.address,
        "department": patient.department,
        "assigned_doctor": patient.assigned_doctor,
        "bed_number": patient.bed_number,
        "current_status": patient.current_status.map(|status| status.as_str()),
        "admission_date": patient.admission_date.map(format_timestamp),
        "emergency_contact_name": patient.emergency_contact.name,
        "emergency_contact_phone": patient.emergency_contact.phone,
        "emergency_contact_relationship": patient.emergency_contact.relationship,
    })
}

/// Columns written back when a bed changes status or occupant.
pub fn bed_to_row(bed: &Bed) -> Value {
    json!({
        "Id": id_value(&bed.id),
        "ward": bed.ward,
        "number": bed.number,
        "status": bed.status.map(|status| status.as_str()),
        "patient_id": bed.patient_id.as_ref().map(id_value),
        "last_cleaned": bed.last_cleaned.map(format_timestamp),
    })
}

fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The backend keys rows by integer; keep non-numeric ids as text.
fn id_value(id: &RecordId) -> Value {
    match id.as_str().parse::<u64>() {
        Ok(number) => json!(number),
        Err(_) => json!(id.as_str()),
    }
}

fn first_present<'r, 'f>(row: &'r Row, fields: &[&'f str]) -> Option<(&'f str, &'r Value)> {
    fields.iter().find_map(|field| {
        row.get(*field)
            .filter(|value| !value.is_null())
            .map(|value| (*field, value))
    })
}

fn text(row: &Row, fields: &[&str]) -> Option<String> {
    let (_, value) = first_present(row, fields)?;
    match value {
        Value::String(text) => Some(text.trim().to_string()).filter(|text| !text.is_empty()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn timestamp(row: &Row, fields: &[&str]) -> Option<DateTime<Utc>> {
    let (field, value) = first_present(row, fields)?;
    let raw = value.as_str().map(str::trim).filter(|raw| !raw.is_empty())?;
    let parsed = parse_timestamp(raw);
    if parsed.is_none() {
        tracing::warn!(field, value = raw, "unparsable timestamp treated as unknown");
    }
    parsed
}

fn date(row: &Row, fields: &[&str]) -> Option<NaiveDate> {
    let (field, value) = first_present(row, fields)?;
    let raw = value.as_str().map(str::trim).filter(|raw| !raw.is_empty())?;
    let parsed = parse_date(raw);
    if parsed.is_none() {
        tracing::warn!(field, value = raw, "unparsable date treated as unknown");
    }
    parsed
}

fn status<T: FromStr>(row: &Row, fields: &[&str]) -> Option<T> {
    let (field, value) = first_present(row, fields)?;
    let raw = value.as_str().map(str::trim).filter(|raw| !raw.is_empty())?;
    let parsed = raw.parse().ok();
    if parsed.is_none() {
        tracing::warn!(field, value = raw, "unknown status treated as unset");
    }
    parsed
}

fn minutes(row: &Row, fields: &[&str]) -> Option<u32> {
    let (_, value) = first_present(row, fields)?;
    match value {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn row_id(row: &Row, entity: &str) -> RecordId {
    first_present(row, &["Id", "id"])
        .and_then(|(_, value)| id_from_value(value))
        .unwrap_or_else(|| RecordId::new(format!("{entity}-unknown")))
}

fn reference(row: &Row, fields: &[&str]) -> Option<RecordId> {
    first_present(row, fields).and_then(|(_, value)| id_from_value(value))
}

fn references(row: &Row, fields: &[&str]) -> Vec<RecordId> {
    let Some((_, value)) = first_present(row, fields) else {
        return Vec::new();
    };
    match value {
        Value::Array(items) => items.iter().filter_map(id_from_value).collect(),
        Value::String(list) => list
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(RecordId::from)
            .collect(),
        other => id_from_value(other).into_iter().collect(),
    }
}

/// Ids arrive as integers, strings, or lookup objects such as `{"Id": 4, "Name": ".."}`.
fn id_from_value(value: &Value) -> Option<RecordId> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .map(RecordId::from)
            .or_else(|| number.as_i64().map(RecordId::from)),
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| RecordId::from(trimmed))
        }
        Value::Object(lookup) => first_present(lookup, &["Id", "id"])
            .and_then(|(_, inner)| match inner {
                Value::Object(_) => None,
                other => id_from_value(other),
            }),
        _ => None,
    }
}
