//! JSON-level implementation of the exported functions.
//!
//! Everything here works on `serde_json::Value` so it runs (and is tested)
//! natively; `lib.rs` only converts to and from `JsValue`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ward_core::time::parse_timestamp;
use ward_core::{EngineConfig, PatientFilter, RecordId, ReportRange, Selection, WardError};
use ward_metrics::AggregationEngine;
use ward_records::{
    appointments_from_value, beds_from_value, json_type, load_snapshot, patients_from_value,
    staff_from_value,
};

/// Partial config as passed from JavaScript; unset keys keep the defaults.
#[derive(Deserialize, Default)]
#[serde(default)]
pub(crate) struct JsEngineConfig {
    #[serde(alias = "bedCapacityPerDepartment")]
    bed_capacity_per_department: Option<u32>,
    #[serde(alias = "recentAdmissionsLimit")]
    recent_admissions_limit: Option<usize>,
    #[serde(alias = "trendWindowDays")]
    trend_window_days: Option<u32>,
    #[serde(alias = "utcOffsetMinutes")]
    utc_offset_minutes: Option<i32>,
}

impl From<JsEngineConfig> for EngineConfig {
    fn from(cfg: JsEngineConfig) -> Self {
        let mut base = EngineConfig::default();
        if let Some(capacity) = cfg.bed_capacity_per_department {
            base.bed_capacity_per_department = capacity;
        }
        if let Some(limit) = cfg.recent_admissions_limit {
            base.recent_admissions_limit = limit;
        }
        if let Some(days) = cfg.trend_window_days {
            base.trend_window_days = days;
        }
        if let Some(minutes) = cfg.utc_offset_minutes {
            base.utc_offset_minutes = minutes;
        }
        base
    }
}

pub(crate) fn engine(config: Option<Value>) -> Result<AggregationEngine, WardError> {
    let config = match config.filter(|value| !value.is_null()) {
        Some(value) => {
            if !value.is_object() {
                return Err(WardError::ContractViolation {
                    argument: "config".to_string(),
                    expected: "a JSON object",
                    found: json_type(&value),
                });
            }
            let partial: JsEngineConfig = serde_json::from_value(value)
                .map_err(|err| WardError::InvalidArgument(format!("config: {err}")))?;
            EngineConfig::from(partial)
        }
        None => EngineConfig::default(),
    };
    AggregationEngine::new(config)
}

/// ISO-8601 text or epoch milliseconds (what `Date.prototype.getTime` gives).
pub(crate) fn instant(value: &Value, argument: &str) -> Result<DateTime<Utc>, WardError> {
    match value {
        Value::String(text) => parse_timestamp(text).ok_or_else(|| {
            WardError::InvalidArgument(format!("{argument}: `{text}` is not a timestamp"))
        }),
        Value::Number(number) => number
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .ok_or_else(|| {
                WardError::InvalidArgument(format!("{argument}: {number} is out of range"))
            }),
        other => Err(WardError::ContractViolation {
            argument: argument.to_string(),
            expected: "an ISO-8601 string or epoch milliseconds",
            found: json_type(other),
        }),
    }
}

fn encode<T: Serialize>(result: T) -> Result<Value, WardError> {
    serde_json::to_value(result).map_err(|err| WardError::Parse(err.to_string()))
}

pub(crate) fn dashboard_metrics(
    patients: &Value,
    appointments: &Value,
    beds: &Value,
    as_of: &Value,
    config: Option<Value>,
) -> Result<Value, WardError> {
    let engine = engine(config)?;
    let patients = patients_from_value(patients)?;
    let appointments = appointments_from_value(appointments)?;
    let beds = beds_from_value(beds)?;
    let as_of = instant(as_of, "asOf")?;
    encode(engine.compute_dashboard_metrics(&patients, &appointments, &beds, as_of))
}

pub(crate) fn filter_patients(patients: &Value, filter: Option<Value>) -> Result<Value, WardError> {
    let patients = patients_from_value(patients)?;
    let filter: PatientFilter = match filter.filter(|value| !value.is_null()) {
        Some(value) => serde_json::from_value(value)
            .map_err(|err| WardError::InvalidArgument(format!("filter: {err}")))?,
        None => PatientFilter::default(),
    };
    encode(ward_metrics::filter_patients(&patients, &filter))
}

pub(crate) fn recent_admissions(
    patients: &Value,
    limit: Option<u32>,
    config: Option<Value>,
) -> Result<Value, WardError> {
    let engine = engine(config)?;
    let patients = patients_from_value(patients)?;
    let recent = match limit {
        Some(limit) => engine.recent_admissions_with_limit(&patients, limit as usize),
        None => engine.recent_admissions(&patients),
    };
    encode(recent)
}

pub(crate) fn bed_statistics(beds: &Value, ward: Option<String>) -> Result<Value, WardError> {
    let beds = beds_from_value(beds)?;
    let ward = ward.map(Selection::from).unwrap_or_default();
    encode(AggregationEngine::default().ward_bed_statistics(&beds, &ward))
}

pub(crate) fn department_statistics(
    patients: &Value,
    staff: &Value,
    department: &str,
    config: Option<Value>,
) -> Result<Value, WardError> {
    let engine = engine(config)?;
    let patients = patients_from_value(patients)?;
    let staff = staff_from_value(staff)?;
    encode(engine.compute_department_statistics(&patients, &staff, department))
}

pub(crate) fn department_trend(
    patients: &Value,
    department: &str,
    reference: &Value,
    config: Option<Value>,
) -> Result<Value, WardError> {
    let engine = engine(config)?;
    let patients = patients_from_value(patients)?;
    let reference = instant(reference, "reference")?;
    encode(engine.compute_department_trend(&patients, department, reference))
}

pub(crate) fn appointment_rates(
    appointments: &Value,
    reference: &Value,
    config: Option<Value>,
) -> Result<Value, WardError> {
    let engine = engine(config)?;
    let appointments = appointments_from_value(appointments)?;
    let reference = instant(reference, "reference")?;
    encode(engine.compute_appointment_rates(&appointments, reference))
}

pub(crate) fn report_metrics(
    snapshot: &Value,
    range: Option<String>,
    as_of: &Value,
) -> Result<Value, WardError> {
    let snapshot = load_snapshot(snapshot)?;
    let range = match range {
        Some(text) => text
            .parse::<ReportRange>()
            .map_err(WardError::InvalidArgument)?,
        None => ReportRange::default(),
    };
    let as_of = instant(as_of, "asOf")?;
    encode(AggregationEngine::default().compute_report_metrics(&snapshot, range, as_of))
}

pub(crate) fn department_analytics(
    patients: &Value,
    reference: &Value,
    config: Option<Value>,
) -> Result<Value, WardError> {
    let engine = engine(config)?;
    let patients = patients_from_value(patients)?;
    let reference = instant(reference, "reference")?;
    encode(engine.department_analytics(&patients, reference))
}

pub(crate) fn resolve_patient_name(
    patients: &Value,
    patient_id: Value,
) -> Result<String, WardError> {
    let patients = patients_from_value(patients)?;
    let found = json_type(&patient_id);
    let patient_id: RecordId =
        serde_json::from_value(patient_id).map_err(|_| WardError::ContractViolation {
            argument: "patientId".to_string(),
            expected: "a string or integer id",
            found,
        })?;
    Ok(ward_metrics::resolve_patient_name(&patients, &patient_id))
}

pub(crate) fn bed_roster(beds: &Value, patients: &Value) -> Result<Value, WardError> {
    let beds = beds_from_value(beds)?;
    let patients = patients_from_value(patients)?;
    encode(ward_metrics::bed_roster(&beds, &patients))
}
