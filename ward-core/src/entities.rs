use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::time::{lenient_date, lenient_enum, lenient_timestamp};

/// Opaque record identifier. Numeric backend ids are kept in decimal text form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => RecordId(text.trim().to_string()),
            Raw::Unsigned(value) => value.into(),
            Raw::Signed(value) => value.into(),
        })
    }
}

/// Clinical status of an admitted patient.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PatientStatus {
    Admitted,
    Critical,
    Stable,
    DischargePending,
}

impl PatientStatus {
    pub const ALL: [PatientStatus; 4] = [
        PatientStatus::Admitted,
        PatientStatus::Critical,
        PatientStatus::Stable,
        PatientStatus::DischargePending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Admitted => "admitted",
            PatientStatus::Critical => "critical",
            PatientStatus::Stable => "stable",
            PatientStatus::DischargePending => "discharge-pending",
        }
    }
}

impl FromStr for PatientStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().replace('_', "-").as_str() {
            "admitted" => Ok(PatientStatus::Admitted),
            "critical" => Ok(PatientStatus::Critical),
            "stable" => Ok(PatientStatus::Stable),
            "discharge-pending" => Ok(PatientStatus::DischargePending),
            other => Err(format!("unknown patient status `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "completed" => Ok(AppointmentStatus::Completed),
            // The backend has stored both spellings.
            "cancelled" | "canceled" => Ok(AppointmentStatus::Cancelled),
            other => Err(format!("unknown appointment status `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BedStatus {
    Available,
    Occupied,
    Cleaning,
    Maintenance,
}

impl BedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BedStatus::Available => "available",
            BedStatus::Occupied => "occupied",
            BedStatus::Cleaning => "cleaning",
            BedStatus::Maintenance => "maintenance",
        }
    }
}

impl FromStr for BedStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "available" => Ok(BedStatus::Available),
            "occupied" => Ok(BedStatus::Occupied),
            "cleaning" => Ok(BedStatus::Cleaning),
            "maintenance" => Ok(BedStatus::Maintenance),
            other => Err(format!("unknown bed status `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EmergencyContact {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub relationship: Option<String>,
}

impl EmergencyContact {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.relationship.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: RecordId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Combined display name, populated by older records instead of the parts.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub assigned_doctor: Option<String>,
    #[serde(default)]
    pub bed_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub current_status: Option<PatientStatus>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub admission_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub emergency_contact: EmergencyContact,
}

impl Patient {
    /// "First Last" built from whichever parts are present.
    pub fn full_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("").trim();
        let last = self.last_name.as_deref().unwrap_or("").trim();
        format!("{first} {last}").trim().to_string()
    }

    /// Name suitable for display, preferring the split parts over `name`.
    pub fn display_name(&self) -> Option<String> {
        let full = self.full_name();
        if !full.is_empty() {
            return Some(full);
        }
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }

    /// Department name without surrounding whitespace; empty when unset.
    pub fn department(&self) -> &str {
        self.department.as_deref().unwrap_or("").trim()
    }

    pub fn in_department(&self, department: &str) -> bool {
        self.department() == department.trim()
    }

    pub fn is_critical(&self) -> bool {
        self.current_status == Some(PatientStatus::Critical)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: RecordId,
    #[serde(default)]
    pub patient_id: Option<RecordId>,
    #[serde(default)]
    pub doctor_id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub date_time: Option<DateTime<Utc>>,
    /// Length in minutes.
    #[serde(default, rename = "duration")]
    pub duration_minutes: Option<u32>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub status: Option<AppointmentStatus>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bed {
    pub id: RecordId,
    #[serde(default)]
    pub ward: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub status: Option<BedStatus>,
    #[serde(default)]
    pub patient_id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_cleaned: Option<DateTime<Utc>>,
}

impl Bed {
    pub fn ward(&self) -> &str {
        self.ward.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: RecordId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub current_patients: Vec<RecordId>,
}

impl StaffMember {
    /// Department name without surrounding whitespace; empty when unset.
    pub fn department(&self) -> &str {
        self.department.as_deref().unwrap_or("").trim()
    }
}

/// Collections fetched together for one dashboard refresh.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HospitalSnapshot {
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
    pub beds: Vec<Bed>,
    pub staff: Vec<StaffMember>,
}
