//! Framework-neutral WASM <-> JavaScript bridge for the ward dashboard.

use serde::Serialize;
use serde_json::Value;
use serde_wasm_bindgen::from_value;
use ward_core::WardError;
use wasm_bindgen::prelude::*;

mod bridge;

fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn read(value: JsValue, argument: &str) -> Result<Value, JsValue> {
    from_value::<Value>(value)
        .map_err(|err| JsValue::from_str(&format!("could not read `{argument}`: {err}")))
}

fn read_optional(value: Option<JsValue>, argument: &str) -> Result<Option<Value>, JsValue> {
    value
        .filter(|value| !value.is_undefined())
        .map(|value| read(value, argument))
        .transpose()
}

fn write<T: Serialize>(result: Result<T, WardError>) -> Result<JsValue, JsValue> {
    let value = result.map_err(format_ward_error)?;
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&format!("could not serialize result: {err}")))
}

fn format_ward_error(err: WardError) -> JsValue {
    JsValue::from_str(&format!("Ward error: {err}"))
}

#[wasm_bindgen]
pub fn dashboard_metrics(
    patients: JsValue,
    appointments: JsValue,
    beds: JsValue,
    as_of: JsValue,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    init();
    write(bridge::dashboard_metrics(
        &read(patients, "patients")?,
        &read(appointments, "appointments")?,
        &read(beds, "beds")?,
        &read(as_of, "asOf")?,
        read_optional(config, "config")?,
    ))
}

#[wasm_bindgen]
pub fn filter_patients(patients: JsValue, filter: Option<JsValue>) -> Result<JsValue, JsValue> {
    init();
    write(bridge::filter_patients(
        &read(patients, "patients")?,
        read_optional(filter, "filter")?,
    ))
}

#[wasm_bindgen]
pub fn recent_admissions(
    patients: JsValue,
    limit: Option<u32>,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    init();
    write(bridge::recent_admissions(
        &read(patients, "patients")?,
        limit,
        read_optional(config, "config")?,
    ))
}

#[wasm_bindgen]
pub fn bed_statistics(beds: JsValue, ward: Option<String>) -> Result<JsValue, JsValue> {
    init();
    write(bridge::bed_statistics(&read(beds, "beds")?, ward))
}

#[wasm_bindgen]
pub fn department_statistics(
    patients: JsValue,
    staff: JsValue,
    department: String,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    init();
    write(bridge::department_statistics(
        &read(patients, "patients")?,
        &read(staff, "staff")?,
        &department,
        read_optional(config, "config")?,
    ))
}

#[wasm_bindgen]
pub fn department_trend(
    patients: JsValue,
    department: String,
    reference: JsValue,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    init();
    write(bridge::department_trend(
        &read(patients, "patients")?,
        &department,
        &read(reference, "reference")?,
        read_optional(config, "config")?,
    ))
}

#[wasm_bindgen]
pub fn appointment_rates(
    appointments: JsValue,
    reference: JsValue,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    init();
    write(bridge::appointment_rates(
        &read(appointments, "appointments")?,
        &read(reference, "reference")?,
        read_optional(config, "config")?,
    ))
}

#[wasm_bindgen]
pub fn report_metrics(
    snapshot: JsValue,
    range: Option<String>,
    as_of: JsValue,
) -> Result<JsValue, JsValue> {
    init();
    write(bridge::report_metrics(
        &read(snapshot, "snapshot")?,
        range,
        &read(as_of, "asOf")?,
    ))
}

#[wasm_bindgen]
pub fn department_analytics(
    patients: JsValue,
    reference: JsValue,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    init();
    write(bridge::department_analytics(
        &read(patients, "patients")?,
        &read(reference, "reference")?,
        read_optional(config, "config")?,
    ))
}

#[wasm_bindgen]
pub fn resolve_patient_name(patients: JsValue, patient_id: JsValue) -> Result<String, JsValue> {
    init();
    bridge::resolve_patient_name(&read(patients, "patients")?, read(patient_id, "patientId")?)
        .map_err(format_ward_error)
}

#[wasm_bindgen]
pub fn bed_roster(beds: JsValue, patients: JsValue) -> Result<JsValue, JsValue> {
    init();
    write(bridge::bed_roster(&read(beds, "beds")?, &read(patients, "patients")?))
}
